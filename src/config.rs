use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Política de contagem de chamados abertos no modo Enterprise.
///
/// Os relatórios de origem divergem: alguns contam como aberto apenas
/// `Status == "aberto"` (linhas com outro valor não entram em nenhum
/// balde), outros definem aberto como o complemento dos fechados, o que
/// garante `total = abertos + fechados`. As duas regras existem aqui como
/// comportamentos nomeados; a estrita é o padrão histórico.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OpenPolicy {
    /// Aberto == status "aberto" literal; "Pendente" e afins não contam.
    Estrita,
    /// Aberto == total − fechados.
    Complemento,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Grafias aceitas para a identidade de fechamento automático.
    pub sentinelas_fechamento_auto: Vec<String>,
    /// Rótulo usado no lugar de valores ausentes nas tabelas de resumo.
    pub rotulo_nao_informado: String,
    pub politica_abertos: OpenPolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            sentinelas_fechamento_auto: vec!["NMC Auto".into(), "NMC.auto".into()],
            rotulo_nao_informado: "Não informado".into(),
            politica_abertos: OpenPolicy::Estrita,
        }
    }
}

impl DashboardConfig {
    /// Carrega a configuração de um arquivo JSON. Chaves omitidas mantêm o
    /// valor padrão.
    pub fn carregar(path: &Path) -> Result<Self, AppError> {
        let conteudo = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&conteudo)?)
    }

    /// True se `valor` é uma das grafias da sentinela de fechamento
    /// automático ("NMC Auto" / "NMC.auto").
    pub fn e_sentinela(&self, valor: &str) -> bool {
        self.sentinelas_fechamento_auto
            .iter()
            .any(|s| s == valor.trim())
    }
}
