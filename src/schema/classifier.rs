use serde::Serialize;

use crate::ingest::DataTable;

/// Colunas que definem o relatório Consumer. O modo só é Consumer quando
/// TODAS estão presentes; qualquer outra combinação cai em Enterprise.
/// A comparação é exata após o trim dos cabeçalhos — um cabeçalho renomeado
/// muda o modo detectado, sem diagnóstico além do título do painel.
pub const COLUNAS_CONSUMER: &[&str] = &[
    "Situação",
    "Assunto",
    "Data/Hora de abertura",
    "Criado por",
    "Causa raiz",
    "Tipo de registro do caso",
    "Caso modificado pela última vez por",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    Enterprise,
    Consumer,
}

impl ReportMode {
    pub fn titulo(self) -> &'static str {
        match self {
            ReportMode::Enterprise => "Chamados NMC Enterprise",
            ReportMode::Consumer => "Chamados Consumer",
        }
    }
}

impl std::fmt::Display for ReportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportMode::Enterprise => write!(f, "enterprise"),
            ReportMode::Consumer => write!(f, "consumer"),
        }
    }
}

/// Decide o modo do relatório pelo conjunto de colunas presentes.
/// Imutável para a vida de um arquivo carregado; rederivado a cada carga.
pub fn detectar_modo(tabela: &DataTable) -> ReportMode {
    if COLUNAS_CONSUMER.iter().all(|c| tabela.has(c)) {
        ReportMode::Consumer
    } else {
        ReportMode::Enterprise
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabela_com(colunas: &[&str]) -> DataTable {
        DataTable::new(colunas.iter().map(|c| c.to_string()).collect(), vec![])
    }

    #[test]
    fn test_todas_colunas_consumer() {
        let t = tabela_com(COLUNAS_CONSUMER);
        assert_eq!(detectar_modo(&t), ReportMode::Consumer);
    }

    #[test]
    fn test_falta_uma_coluna_consumer() {
        // remover qualquer uma das sete colunas derruba para Enterprise
        for i in 0..COLUNAS_CONSUMER.len() {
            let colunas: Vec<&str> = COLUNAS_CONSUMER
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, c)| *c)
                .collect();
            let t = tabela_com(&colunas);
            assert_eq!(
                detectar_modo(&t),
                ReportMode::Enterprise,
                "sem {:?} deveria ser Enterprise",
                COLUNAS_CONSUMER[i]
            );
        }
    }

    #[test]
    fn test_colunas_enterprise() {
        let t = tabela_com(&["Status", "Fechado por", "Histórico", "Criado por"]);
        assert_eq!(detectar_modo(&t), ReportMode::Enterprise);
    }

    #[test]
    fn test_colunas_extras_nao_afetam_consumer() {
        let mut colunas: Vec<&str> = COLUNAS_CONSUMER.to_vec();
        colunas.push("Coluna extra");
        let t = tabela_com(&colunas);
        assert_eq!(detectar_modo(&t), ReportMode::Consumer);
    }

    #[test]
    fn test_tabela_sem_colunas_conhecidas() {
        let t = tabela_com(&["A", "B"]);
        assert_eq!(detectar_modo(&t), ReportMode::Enterprise);
    }

    #[test]
    fn test_titulos() {
        assert_eq!(ReportMode::Consumer.titulo(), "Chamados Consumer");
        assert_eq!(ReportMode::Enterprise.titulo(), "Chamados NMC Enterprise");
    }
}
