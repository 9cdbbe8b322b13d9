pub mod datetime;

use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::DashboardConfig;
use crate::ingest::DataTable;
use crate::schema::{Concept, ReportMode, ReportSchema};

/// Marcador fixo do trecho do histórico que carrega o nome de quem abriu o
/// chamado. É a única âncora disponível para desfazer o "NMC Auto".
pub const MARCADOR_ABERTURA: &str = "Usuário efetuando abertura:";

/// Registro de chamado normalizado. `linha` aponta para a linha de origem
/// na tabela, preservada para a exportação da visão filtrada.
#[derive(Debug, Clone)]
pub struct Chamado {
    pub linha: usize,
    pub status: Option<String>,
    pub situacao: Option<String>,
    pub fechado_por: Option<String>,
    pub reclamacao: Option<String>,
    pub criado_por: Option<String>,
    pub diagnostico: Option<String>,
    pub modificado_por: Option<String>,
    pub abertura: Option<NaiveDateTime>,
    pub fechamento: Option<NaiveDateTime>,
}

impl Chamado {
    /// Valor textual do conceito, para filtros e tabelas de resumo.
    pub fn campo(&self, conceito: Concept) -> Option<&str> {
        let valor = match conceito {
            Concept::Status => &self.status,
            Concept::Situacao => &self.situacao,
            Concept::FechadoPor => &self.fechado_por,
            Concept::Reclamacao => &self.reclamacao,
            Concept::CriadoPor => &self.criado_por,
            Concept::Diagnostico => &self.diagnostico,
            Concept::ModificadoPor => &self.modificado_por,
            _ => &None,
        };
        valor.as_deref()
    }

    pub fn fechado_enterprise(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("fechado"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtracaoFechadoPor {
    #[error("marcador de abertura ausente no histórico")]
    MarcadorAusente,
    #[error("nome vazio após o marcador")]
    NomeVazio,
}

/// Extrai do histórico o nome após o marcador de abertura. Substitui o
/// padrão antigo de engolir qualquer falha: o chamador decide o que fazer
/// com o erro.
pub fn extrair_fechado_por(historico: &str) -> Result<String, ExtracaoFechadoPor> {
    let posicao = historico
        .find(MARCADOR_ABERTURA)
        .ok_or(ExtracaoFechadoPor::MarcadorAusente)?;
    let nome = historico[posicao + MARCADOR_ABERTURA.len()..].trim();
    if nome.is_empty() {
        return Err(ExtracaoFechadoPor::NomeVazio);
    }
    Ok(nome.to_string())
}

/// Contabilidade da substituição do fechamento automático.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AutoCloserStats {
    /// Linhas fechadas cujo "Fechado por" era a sentinela.
    pub candidatos: usize,
    pub substituidos: usize,
    /// Candidatos cuja extração falhou (marcador ausente ou nome vazio).
    pub falhas: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NormalizeStats {
    pub auto_closer: AutoCloserStats,
    /// Células de data/hora não vazias que não puderam ser interpretadas.
    pub datas_invalidas: usize,
}

#[derive(Debug)]
pub struct NormalizeOutput {
    pub chamados: Vec<Chamado>,
    pub stats: NormalizeStats,
}

/// Limpa a tabela em memória e constrói os registros tipados.
///
/// Passos: trim de todas as células; substituição do "NMC Auto" pelo nome
/// minerado do histórico (somente Enterprise, gravada de volta na tabela
/// para que a exportação reflita o valor corrigido); interpretação das
/// colunas de data/hora listadas no mapa de campos do modo.
pub fn normalizar(
    tabela: &mut DataTable,
    schema: &ReportSchema,
    config: &DashboardConfig,
) -> NormalizeOutput {
    tabela.trim_cells();

    let mut stats = NormalizeStats::default();
    stats.auto_closer = substituir_fechamento_auto(tabela, schema, config);

    let mut chamados = Vec::with_capacity(tabela.len());
    for linha in 0..tabela.len() {
        let valor = |c: Concept| -> Option<String> {
            schema
                .coluna_presente(c)
                .and_then(|col| tabela.get_non_empty(linha, col))
                .map(str::to_string)
        };

        let abertura = periodo(
            tabela,
            schema,
            linha,
            Concept::DataAbertura,
            Concept::HoraAbertura,
            &mut stats.datas_invalidas,
        );
        let fechamento = periodo(
            tabela,
            schema,
            linha,
            Concept::DataFechamento,
            Concept::HoraFechamento,
            &mut stats.datas_invalidas,
        );

        chamados.push(Chamado {
            linha,
            status: valor(Concept::Status),
            situacao: valor(Concept::Situacao),
            fechado_por: valor(Concept::FechadoPor),
            reclamacao: valor(Concept::Reclamacao),
            criado_por: valor(Concept::CriadoPor),
            diagnostico: valor(Concept::Diagnostico),
            modificado_por: valor(Concept::ModificadoPor),
            abertura,
            fechamento,
        });
    }

    if stats.datas_invalidas > 0 {
        warn!(
            datas_invalidas = stats.datas_invalidas,
            "células de data/hora descartadas na normalização"
        );
    }
    debug!(registros = chamados.len(), "normalização concluída");

    NormalizeOutput { chamados, stats }
}

fn periodo(
    tabela: &DataTable,
    schema: &ReportSchema,
    linha: usize,
    data: Concept,
    hora: Concept,
    datas_invalidas: &mut usize,
) -> Option<NaiveDateTime> {
    let celula_data = schema
        .coluna_presente(data)
        .and_then(|col| tabela.get_non_empty(linha, col))?;
    let celula_hora = schema
        .coluna_presente(hora)
        .and_then(|col| tabela.get_non_empty(linha, col));
    let parseado = datetime::combinar(celula_data, celula_hora);
    if parseado.is_none() {
        *datas_invalidas += 1;
    }
    parseado
}

fn substituir_fechamento_auto(
    tabela: &mut DataTable,
    schema: &ReportSchema,
    config: &DashboardConfig,
) -> AutoCloserStats {
    let mut stats = AutoCloserStats::default();
    if schema.modo != ReportMode::Enterprise {
        return stats;
    }
    let (Some(col_status), Some(col_fechado), Some(col_historico)) = (
        schema.coluna_presente(Concept::Status),
        schema.coluna_presente(Concept::FechadoPor),
        schema.coluna_presente(Concept::Historico),
    ) else {
        return stats;
    };

    for linha in 0..tabela.len() {
        let fechado = tabela
            .get(linha, col_status)
            .is_some_and(|s| s.trim().eq_ignore_ascii_case("fechado"));
        if !fechado {
            continue;
        }
        let sentinela = tabela
            .get(linha, col_fechado)
            .is_some_and(|v| config.e_sentinela(v));
        if !sentinela {
            continue;
        }
        stats.candidatos += 1;
        let historico = tabela.get(linha, col_historico).unwrap_or("");
        match extrair_fechado_por(historico) {
            Ok(nome) => {
                tabela.set(linha, col_fechado, nome);
                stats.substituidos += 1;
            }
            Err(motivo) => {
                debug!(linha = linha + 2, %motivo, "substituição do fechamento automático falhou");
                stats.falhas += 1;
            }
        }
    }

    if stats.falhas > 0 {
        warn!(
            candidatos = stats.candidatos,
            falhas = stats.falhas,
            "fechamentos automáticos sem nome recuperável no histórico"
        );
    }
    stats
}
