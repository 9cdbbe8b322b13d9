use std::collections::HashMap;

use serde::Serialize;

use crate::aggregate::stats::{media, pct, round1, round2};
use crate::config::OpenPolicy;
use crate::normalize::Chamado;
use crate::schema::{Concept, ReportMode, ReportSchema};

/// Situações Consumer que contam como encerradas.
const SITUACOES_FECHADAS: &[&str] = &["resolvido", "completado"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ContagemStatus {
    pub total: usize,
    pub abertos: usize,
    pub fechados: usize,
    pub pct_abertos: f64,
    pub pct_fechados: f64,
}

/// Partição aberto/fechado da visão filtrada.
///
/// Enterprise na política estrita conta aberto e fechado por igualdade
/// literal de status; linhas com outro valor ("Pendente" etc.) ficam fora
/// dos dois baldes e `abertos + fechados` pode ser menor que `total`. Na
/// política de complemento, aberto = total − fechados. Consumer fecha por
/// situação resolvida/completada com responsável de última modificação
/// registrado, e abre por complemento nas duas políticas.
pub fn contagem_status(
    chamados: &[Chamado],
    modo: ReportMode,
    politica: OpenPolicy,
) -> ContagemStatus {
    let total = chamados.len();
    let (abertos, fechados) = match modo {
        ReportMode::Consumer => {
            let fechados = chamados.iter().filter(|c| fechado_consumer(c)).count();
            (total - fechados, fechados)
        }
        ReportMode::Enterprise => {
            let fechados = chamados.iter().filter(|c| c.fechado_enterprise()).count();
            let abertos = match politica {
                OpenPolicy::Estrita => chamados
                    .iter()
                    .filter(|c| {
                        c.status
                            .as_deref()
                            .is_some_and(|s| s.eq_ignore_ascii_case("aberto"))
                    })
                    .count(),
                OpenPolicy::Complemento => total - fechados,
            };
            (abertos, fechados)
        }
    };
    ContagemStatus {
        total,
        abertos,
        fechados,
        pct_abertos: round1(pct(abertos, total)),
        pct_fechados: round1(pct(fechados, total)),
    }
}

fn fechado_consumer(chamado: &Chamado) -> bool {
    let situacao_fechada = chamado
        .situacao
        .as_deref()
        .is_some_and(|s| SITUACOES_FECHADAS.contains(&s.to_lowercase().as_str()));
    situacao_fechada && chamado.modificado_por.is_some()
}

/// Tempo médio de atendimento em minutos: somente linhas com abertura e
/// fechamento interpretados e delta não negativo entram na média; sem
/// nenhuma linha qualificada o resultado é 0.0. Consumer não tem carimbo
/// de fechamento, logo 0.0.
pub fn tempo_medio_minutos(chamados: &[Chamado], modo: ReportMode) -> f64 {
    if modo != ReportMode::Enterprise {
        return 0.0;
    }
    let minutos: Vec<f64> = chamados
        .iter()
        .filter_map(|c| {
            let abertura = c.abertura?;
            let fechamento = c.fechamento?;
            let delta = (fechamento - abertura).num_seconds() as f64 / 60.0;
            (delta >= 0.0).then_some(delta)
        })
        .collect();
    round2(media(&minutos))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaiorOfensor {
    pub rotulo: String,
    pub qtd: usize,
    pub pct: f64,
}

impl Default for MaiorOfensor {
    fn default() -> Self {
        MaiorOfensor {
            rotulo: "-".into(),
            qtd: 0,
            pct: 0.0,
        }
    }
}

/// Valor mais frequente do diagnóstico (Causa raiz no Consumer), com
/// ausentes preenchidos pelo rótulo de não informado. Desempate
/// determinístico: primeira aparição na ordem das linhas. Percentual sobre
/// o total filtrado. Coluna ausente ou visão vazia degradam para o
/// placeholder.
pub fn maior_ofensor(
    chamados: &[Chamado],
    schema: &ReportSchema,
    rotulo_nao_informado: &str,
) -> MaiorOfensor {
    if !schema.presente(Concept::Diagnostico) || chamados.is_empty() {
        return MaiorOfensor::default();
    }

    let mut contagens: HashMap<&str, usize> = HashMap::new();
    let mut ordem: Vec<&str> = Vec::new();
    for chamado in chamados {
        let valor = chamado
            .campo(Concept::Diagnostico)
            .unwrap_or(rotulo_nao_informado);
        let entrada = contagens.entry(valor).or_insert(0);
        if *entrada == 0 {
            ordem.push(valor);
        }
        *entrada += 1;
    }

    let mut vencedor = ("-", 0usize);
    for rotulo in &ordem {
        let qtd = contagens[rotulo];
        if qtd > vencedor.1 {
            vencedor = (rotulo, qtd);
        }
    }

    MaiorOfensor {
        rotulo: vencedor.0.to_string(),
        qtd: vencedor.1,
        pct: round2(pct(vencedor.1, chamados.len())),
    }
}
