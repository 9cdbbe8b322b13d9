use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::error::AppError;
use crate::export::{formato_cabecalho, formato_decimal, formato_inteiro, formato_percentual};
use crate::report::Dashboard;

/// Gera a pasta de trabalho do painel: aba "Resumo" com as métricas, uma
/// aba por quadro de classificação e a aba "Chamados" com as linhas brutas
/// da visão filtrada. Retorna os bytes do XLSX.
pub fn gerar_xlsx(dash: &Dashboard) -> Result<Vec<u8>, AppError> {
    let mut wb = Workbook::new();
    escrever_resumo(&mut wb, dash)?;
    for tabela in &dash.tabelas {
        escrever_quadro(&mut wb, tabela)?;
    }
    escrever_chamados(&mut wb, dash)?;
    Ok(wb.save_to_buffer()?)
}

// ── Aba 1: Resumo ────────────────────────────────────────────────────────────

fn escrever_resumo(wb: &mut Workbook, dash: &Dashboard) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name("Resumo")?;

    let hdr = formato_cabecalho();
    let int = formato_inteiro();
    let num = formato_decimal();
    let pct = formato_percentual();

    ws.write_with_format(0, 0, "Indicador", &hdr)?;
    ws.write_with_format(0, 1, "Valor", &hdr)?;

    let contagem = &dash.resumo.contagem;
    let ofensor = &dash.resumo.maior_ofensor;

    ws.write(1, 0, dash.titulo.as_str())?;
    ws.write(2, 0, "Total de chamados")?;
    ws.write_with_format(2, 1, contagem.total as f64, &int)?;
    ws.write(3, 0, "Chamados abertos")?;
    ws.write_with_format(3, 1, contagem.abertos as f64, &int)?;
    ws.write(4, 0, "% abertos")?;
    ws.write_with_format(4, 1, contagem.pct_abertos / 100.0, &pct)?;
    ws.write(5, 0, "Chamados fechados")?;
    ws.write_with_format(5, 1, contagem.fechados as f64, &int)?;
    ws.write(6, 0, "% fechados")?;
    ws.write_with_format(6, 1, contagem.pct_fechados / 100.0, &pct)?;
    ws.write(7, 0, "Tempo médio total (min)")?;
    ws.write_with_format(7, 1, dash.resumo.tempo_medio_minutos, &num)?;
    ws.write(8, 0, "Maior ofensor")?;
    ws.write(8, 1, ofensor.rotulo.as_str())?;
    ws.write(9, 0, "Qtd do maior ofensor")?;
    ws.write_with_format(9, 1, ofensor.qtd as f64, &int)?;
    ws.write(10, 0, "% do maior ofensor")?;
    ws.write_with_format(10, 1, ofensor.pct / 100.0, &pct)?;

    ws.set_column_width(0, 26)?;
    ws.set_column_width(1, 18)?;

    Ok(())
}

// ── Abas de quadros ──────────────────────────────────────────────────────────

/// Nome de aba válido: máximo 31 caracteres.
fn nome_aba(titulo: &str) -> String {
    titulo.chars().take(31).collect()
}

fn escrever_quadro(
    wb: &mut Workbook,
    tabela: &crate::aggregate::TabelaResumo,
) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name(nome_aba(&tabela.titulo))?;

    let hdr = formato_cabecalho();
    let int = formato_inteiro();
    let pct = formato_percentual();

    ws.write_with_format(0, 0, tabela.campo.as_str(), &hdr)?;
    ws.write_with_format(0, 1, "Qtd de Chamados", &hdr)?;
    ws.write_with_format(0, 2, "% do Total", &hdr)?;

    for (i, linha) in tabela.linhas.iter().enumerate() {
        let row = (i + 1) as u32;
        ws.write(row, 0, linha.rotulo.as_str())?;
        ws.write_with_format(row, 1, linha.qtd as f64, &int)?;
        ws.write_with_format(row, 2, linha.pct / 100.0, &pct)?;
    }

    if !tabela.linhas.is_empty() {
        let ultima = tabela.linhas.len() as u32;
        ws.set_freeze_panes(1, 0)?;
        ws.autofilter(0, 0, ultima, 2)?;
    }

    ws.set_column_width(0, 36)?;
    ws.set_column_width(1, 16)?;
    ws.set_column_width(2, 12)?;

    Ok(())
}

// ── Aba final: visão filtrada bruta ──────────────────────────────────────────

fn escrever_chamados(wb: &mut Workbook, dash: &Dashboard) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name("Chamados")?;

    let hdr = formato_cabecalho();
    for (col, cabecalho) in dash.cabecalhos.iter().enumerate() {
        ws.write_with_format(0, col as u16, cabecalho.as_str(), &hdr)?;
    }
    for (i, linha) in dash.linhas_filtradas.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, celula) in linha.iter().enumerate() {
            ws.write(row, col as u16, celula.as_str())?;
        }
    }

    if !dash.linhas_filtradas.is_empty() {
        let ultima = dash.linhas_filtradas.len() as u32;
        ws.set_freeze_panes(1, 0)?;
        ws.autofilter(0, 0, ultima, (dash.cabecalhos.len().max(1) - 1) as u16)?;
    }
    largura_padrao(ws, dash.cabecalhos.len())?;

    Ok(())
}

fn largura_padrao(ws: &mut Worksheet, colunas: usize) -> Result<(), XlsxError> {
    for col in 0..colunas {
        ws.set_column_width(col as u16, 22)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{ContagemStatus, LinhaResumo, MaiorOfensor, ResumoChamados, TabelaResumo};
    use crate::normalize::NormalizeStats;
    use crate::schema::ReportMode;

    fn dashboard_exemplo() -> Dashboard {
        Dashboard {
            titulo: "Chamados NMC Enterprise".into(),
            modo: ReportMode::Enterprise,
            resumo: ResumoChamados {
                contagem: ContagemStatus {
                    total: 3,
                    abertos: 1,
                    fechados: 2,
                    pct_abertos: 33.3,
                    pct_fechados: 66.7,
                },
                tempo_medio_minutos: 45.5,
                maior_ofensor: MaiorOfensor {
                    rotulo: "Rede".into(),
                    qtd: 2,
                    pct: 66.67,
                },
            },
            tabelas: vec![TabelaResumo {
                titulo: "Classificação por Diagnóstico".into(),
                campo: "Diagnóstico".into(),
                linhas: vec![
                    LinhaResumo {
                        rotulo: "Energia".into(),
                        qtd: 1,
                        pct: 33.33,
                    },
                    LinhaResumo {
                        rotulo: "Rede".into(),
                        qtd: 2,
                        pct: 66.67,
                    },
                ],
            }],
            cabecalhos: vec!["Status".into(), "Diagnóstico".into()],
            linhas_filtradas: vec![
                vec!["Fechado".into(), "Rede".into()],
                vec!["Aberto".into(), "Energia".into()],
                vec!["Fechado".into(), "Rede".into()],
            ],
            stats: NormalizeStats::default(),
        }
    }

    #[test]
    fn test_gerar_xlsx_assinatura_zip() {
        let bytes = gerar_xlsx(&dashboard_exemplo()).unwrap();
        assert!(bytes.len() > 4, "XLSX pequeno demais");
        // bytes mágicos ZIP "PK"
        assert_eq!(bytes[0], 0x50);
        assert_eq!(bytes[1], 0x4B);
    }

    #[test]
    fn test_gerar_xlsx_visao_vazia() {
        let mut dash = dashboard_exemplo();
        dash.linhas_filtradas.clear();
        dash.tabelas.clear();
        let bytes = gerar_xlsx(&dash).unwrap();
        assert_eq!(bytes[0], 0x50);
        assert_eq!(bytes[1], 0x4B);
    }

    #[test]
    fn test_nome_aba_truncado() {
        let longo = "um título de quadro comprido demais para caber numa aba";
        assert_eq!(nome_aba(longo).chars().count(), 31);
        assert_eq!(nome_aba("Resumo"), "Resumo");
    }
}
