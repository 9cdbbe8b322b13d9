use std::fmt::Write as _;

use crate::aggregate::TabelaResumo;
use crate::report::Dashboard;

/// Documento HTML autossuficiente do painel: bloco de métricas, um quadro
/// tabela+barras por campo e a tabela completa da visão filtrada. CSS
/// embutido, sem dependência externa.
pub fn gerar_html(dash: &Dashboard) -> String {
    let mut corpo = String::new();

    let contagem = &dash.resumo.contagem;
    let ofensor = &dash.resumo.maior_ofensor;
    let _ = write!(
        corpo,
        "<h1>{}</h1>\n\
         <div class='metric'>Tempo médio total (min): {:.2}</div>\n\
         <div class='metric'>Total de chamados: {}</div>\n\
         <div class='metric'>Abertos: {} ({:.1}%)</div>\n\
         <div class='metric'>Fechados: {} ({:.1}%)</div>\n\
         <div class='metric'>Maior ofensor: {} ({:.2}% - {})</div>\n",
        escape(&dash.titulo),
        dash.resumo.tempo_medio_minutos,
        contagem.total,
        contagem.abertos,
        contagem.pct_abertos,
        contagem.fechados,
        contagem.pct_fechados,
        escape(&ofensor.rotulo),
        ofensor.pct,
        ofensor.qtd,
    );

    if dash.stats.auto_closer.falhas > 0 {
        let _ = write!(
            corpo,
            "<div class='aviso'>Substituição do fechamento automático falhou em {} de {} linhas candidatas.</div>\n",
            dash.stats.auto_closer.falhas, dash.stats.auto_closer.candidatos,
        );
    }

    for tabela in &dash.tabelas {
        corpo.push_str(&render_quadro(tabela));
    }

    corpo.push_str("<h2>Tabela completa filtrada</h2>\n");
    corpo.push_str(&render_tabela_bruta(dash));

    format!(
        "<!DOCTYPE html>\n<html lang='pt-BR'>\n<head>\n<meta charset='utf-8'>\n\
         <title>{titulo}</title>\n<style>{css}</style>\n</head>\n<body>\n{corpo}</body>\n</html>\n",
        titulo = escape(&dash.titulo),
        css = CSS,
        corpo = corpo,
    )
}

const CSS: &str = "\
body { background:#f0f4f8; font-family:Arial, sans-serif; color:#000; margin:25px; }\n\
h1 { text-align:center; }\n\
h2 { margin-top:40px; }\n\
table { border-collapse:collapse; width:100%; margin:15px 0; }\n\
th, td { border:1px solid #ccc; padding:6px; background:#fafafa; text-align:left; }\n\
th { background:#e2e2e2; }\n\
.metric { margin:6px 0; font-weight:bold; }\n\
.aviso { margin:6px 0; color:#833C0C; }\n\
.linha { display:flex; flex-direction:row; gap:40px; align-items:flex-start; }\n\
.col-esq { width:45%; }\n\
.col-dir { width:55%; }\n\
.barra-fundo { background:#d9e4f5; height:18px; margin:3px 0; }\n\
.barra { background:#2C5F8A; height:18px; }\n\
.barra-rotulo { font-size:12px; }\n";

fn render_quadro(tabela: &TabelaResumo) -> String {
    let mut html = String::new();
    let _ = write!(html, "<h2>{}</h2>\n<div class='linha'>\n", escape(&tabela.titulo));

    // tabela à esquerda
    html.push_str("<div class='col-esq'><table>\n<tr>");
    let _ = write!(
        html,
        "<th>{}</th><th>Qtd de Chamados</th><th>% do Total</th>",
        escape(&tabela.campo)
    );
    html.push_str("</tr>\n");
    for linha in &tabela.linhas {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{:.2}</td></tr>\n",
            escape(&linha.rotulo),
            linha.qtd,
            linha.pct
        );
    }
    html.push_str("</table></div>\n");

    // barras à direita, largura relativa ao maior valor
    let maior = tabela.linhas.iter().map(|l| l.qtd).max().unwrap_or(0);
    html.push_str("<div class='col-dir'>\n");
    for linha in &tabela.linhas {
        let largura = if maior == 0 {
            0.0
        } else {
            linha.qtd as f64 / maior as f64 * 100.0
        };
        let _ = write!(
            html,
            "<div class='barra-rotulo'>{} ({})</div>\n\
             <div class='barra-fundo'><div class='barra' style='width:{:.1}%'></div></div>\n",
            escape(&linha.rotulo),
            linha.qtd,
            largura
        );
    }
    html.push_str("</div>\n</div>\n");
    html
}

fn render_tabela_bruta(dash: &Dashboard) -> String {
    let mut html = String::from("<table>\n<tr>");
    for cabecalho in &dash.cabecalhos {
        let _ = write!(html, "<th>{}</th>", escape(cabecalho));
    }
    html.push_str("</tr>\n");
    for linha in &dash.linhas_filtradas {
        html.push_str("<tr>");
        for celula in linha {
            let _ = write!(html, "<td>{}</td>", escape(celula));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
    html
}

fn escape(texto: &str) -> String {
    let mut saida = String::with_capacity(texto.len());
    for c in texto.chars() {
        match c {
            '&' => saida.push_str("&amp;"),
            '<' => saida.push_str("&lt;"),
            '>' => saida.push_str("&gt;"),
            '"' => saida.push_str("&quot;"),
            '\'' => saida.push_str("&#39;"),
            outro => saida.push(outro),
        }
    }
    saida
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{ContagemStatus, LinhaResumo, MaiorOfensor, ResumoChamados};
    use crate::normalize::{AutoCloserStats, NormalizeStats};
    use crate::schema::ReportMode;

    fn dashboard_exemplo() -> Dashboard {
        Dashboard {
            titulo: "Chamados Consumer".into(),
            modo: ReportMode::Consumer,
            resumo: ResumoChamados {
                contagem: ContagemStatus {
                    total: 2,
                    abertos: 1,
                    fechados: 1,
                    pct_abertos: 50.0,
                    pct_fechados: 50.0,
                },
                tempo_medio_minutos: 0.0,
                maior_ofensor: MaiorOfensor {
                    rotulo: "Rede & Fibra".into(),
                    qtd: 1,
                    pct: 50.0,
                },
            },
            tabelas: vec![TabelaResumo {
                titulo: "Classificação por Reclamação".into(),
                campo: "Assunto".into(),
                linhas: vec![LinhaResumo {
                    rotulo: "<Lentidão>".into(),
                    qtd: 2,
                    pct: 100.0,
                }],
            }],
            cabecalhos: vec!["Situação".into()],
            linhas_filtradas: vec![vec!["Resolvido".into()], vec!["Aberto".into()]],
            stats: NormalizeStats::default(),
        }
    }

    #[test]
    fn test_html_autossuficiente() {
        let html = gerar_html(&dashboard_exemplo());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>"));
        assert!(!html.contains("http://"), "sem dependência externa");
        assert!(!html.contains("https://"), "sem dependência externa");
    }

    #[test]
    fn test_html_contem_metricas() {
        let html = gerar_html(&dashboard_exemplo());
        assert!(html.contains("Total de chamados: 2"));
        assert!(html.contains("Abertos: 1 (50.0%)"));
        assert!(html.contains("Classificação por Reclamação"));
        assert!(html.contains("Tabela completa filtrada"));
    }

    #[test]
    fn test_html_escapa_valores() {
        let html = gerar_html(&dashboard_exemplo());
        assert!(html.contains("&lt;Lentidão&gt;"));
        assert!(html.contains("Rede &amp; Fibra"));
        assert!(!html.contains("<Lentidão>"));
    }

    #[test]
    fn test_html_aviso_de_falhas() {
        let mut dash = dashboard_exemplo();
        dash.stats = NormalizeStats {
            auto_closer: AutoCloserStats {
                candidatos: 3,
                substituidos: 2,
                falhas: 1,
            },
            datas_invalidas: 0,
        };
        let html = gerar_html(&dash);
        assert!(html.contains("falhou em 1 de 3"));
    }
}
