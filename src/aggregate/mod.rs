pub mod breakdown;
pub mod metrics;
pub mod stats;

pub use breakdown::{tabela_resumo, tabelas_resumo, LinhaResumo, TabelaResumo, CAMPOS_RESUMO};
pub use metrics::{
    contagem_status, maior_ofensor, tempo_medio_minutos, ContagemStatus, MaiorOfensor,
};

use serde::Serialize;

use crate::config::OpenPolicy;
use crate::normalize::Chamado;
use crate::schema::ReportSchema;

/// Fotografia agregada da visão filtrada, recomputada a cada interação.
#[derive(Debug, Clone, Serialize)]
pub struct ResumoChamados {
    pub contagem: ContagemStatus,
    pub tempo_medio_minutos: f64,
    pub maior_ofensor: MaiorOfensor,
}

pub fn resumo(
    chamados: &[Chamado],
    schema: &ReportSchema,
    politica: OpenPolicy,
    rotulo_nao_informado: &str,
) -> ResumoChamados {
    ResumoChamados {
        contagem: contagem_status(chamados, schema.modo, politica),
        tempo_medio_minutos: tempo_medio_minutos(chamados, schema.modo),
        maior_ofensor: maior_ofensor(chamados, schema, rotulo_nao_informado),
    }
}
