use serde::Serialize;
use tracing::{debug, info};

use crate::aggregate::{self, tabelas_resumo, ResumoChamados, TabelaResumo};
use crate::config::DashboardConfig;
use crate::error::AppError;
use crate::filter::FilterSet;
use crate::ingest::DataTable;
use crate::normalize::{normalizar, NormalizeStats};
use crate::schema::{ReportMode, ReportSchema};

/// Resultado completo de uma rodada do painel: métricas, quadros e a visão
/// filtrada pronta para exportação. Nada aqui é persistido.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub titulo: String,
    pub modo: ReportMode,
    pub resumo: ResumoChamados,
    pub tabelas: Vec<TabelaResumo>,
    pub cabecalhos: Vec<String>,
    pub linhas_filtradas: Vec<Vec<String>>,
    pub stats: NormalizeStats,
}

/// Executa o pipeline linear completo sobre um arquivo carregado:
/// classificação do esquema → normalização → filtros → agregação. Uma
/// chamada por interação; sem estado compartilhado entre chamadas.
pub fn gerar_dashboard(
    mut tabela: DataTable,
    filtros: &FilterSet,
    config: &DashboardConfig,
) -> Result<Dashboard, AppError> {
    let schema = ReportSchema::detectar(&tabela);
    info!(modo = %schema.modo, linhas = tabela.len(), "esquema detectado");

    let saida = normalizar(&mut tabela, &schema, config);
    let filtrados = filtros.aplicar(&saida.chamados, &config.rotulo_nao_informado);
    debug!(
        total = saida.chamados.len(),
        filtrados = filtrados.len(),
        "filtros aplicados"
    );

    let resumo = aggregate::resumo(
        &filtrados,
        &schema,
        config.politica_abertos,
        &config.rotulo_nao_informado,
    );
    let tabelas = tabelas_resumo(&filtrados, &schema, &config.rotulo_nao_informado);

    let linhas_filtradas = filtrados
        .iter()
        .map(|c| tabela.rows()[c.linha].clone())
        .collect();

    Ok(Dashboard {
        titulo: schema.modo.titulo().to_string(),
        modo: schema.modo,
        resumo,
        tabelas,
        cabecalhos: tabela.headers().to_vec(),
        linhas_filtradas,
        stats: saida.stats,
    })
}
