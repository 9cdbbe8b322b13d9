use std::collections::BTreeMap;

use serde::Serialize;

use crate::aggregate::stats::{pct, round2};
use crate::normalize::Chamado;
use crate::schema::{Concept, ReportSchema};

/// Pares campo/título dos quadros do painel, na ordem de exibição original.
pub const CAMPOS_RESUMO: &[(Concept, &str)] = &[
    (Concept::CriadoPor, "Chamados abertos por usuário"),
    (Concept::Reclamacao, "Classificação por Reclamação"),
    (Concept::Diagnostico, "Classificação por Diagnóstico"),
    (Concept::FechadoPor, "Chamados fechados por usuário"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinhaResumo {
    pub rotulo: String,
    pub qtd: usize,
    pub pct: f64,
}

/// Tabela de contagem por valor de um campo categórico. Os percentuais são
/// sobre o total da própria tabela e somam ~100% independentes das demais.
#[derive(Debug, Clone, Serialize)]
pub struct TabelaResumo {
    pub titulo: String,
    pub campo: String,
    pub linhas: Vec<LinhaResumo>,
}

/// Monta a tabela de um campo, com ausentes no rótulo de não informado e
/// linhas em ordem alfabética de rótulo. None quando o campo não existe no
/// arquivo carregado.
pub fn tabela_resumo(
    chamados: &[Chamado],
    schema: &ReportSchema,
    campo: Concept,
    titulo: &str,
    rotulo_nao_informado: &str,
) -> Option<TabelaResumo> {
    let coluna = schema.coluna_presente(campo)?;

    let mut contagens: BTreeMap<&str, usize> = BTreeMap::new();
    for chamado in chamados {
        let valor = chamado.campo(campo).unwrap_or(rotulo_nao_informado);
        *contagens.entry(valor).or_insert(0) += 1;
    }

    let total: usize = contagens.values().sum();
    let linhas = contagens
        .into_iter()
        .map(|(rotulo, qtd)| LinhaResumo {
            rotulo: rotulo.to_string(),
            qtd,
            pct: round2(pct(qtd, total)),
        })
        .collect();

    Some(TabelaResumo {
        titulo: titulo.to_string(),
        campo: coluna.to_string(),
        linhas,
    })
}

/// Todos os quadros do painel para os campos presentes.
pub fn tabelas_resumo(
    chamados: &[Chamado],
    schema: &ReportSchema,
    rotulo_nao_informado: &str,
) -> Vec<TabelaResumo> {
    CAMPOS_RESUMO
        .iter()
        .filter_map(|&(campo, titulo)| {
            tabela_resumo(chamados, schema, campo, titulo, rotulo_nao_informado)
        })
        .collect()
}
