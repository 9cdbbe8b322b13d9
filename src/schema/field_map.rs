use std::collections::BTreeSet;

use serde::Serialize;

use crate::ingest::DataTable;
use crate::schema::classifier::{detectar_modo, ReportMode};

/// Conceitos canônicos do registro de chamado. Cada modo mapeia um
/// subconjunto deles para uma coluna real do arquivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Concept {
    Status,
    FechadoPor,
    Historico,
    Reclamacao,
    CriadoPor,
    Diagnostico,
    DataAbertura,
    HoraAbertura,
    DataFechamento,
    HoraFechamento,
    Situacao,
    ModificadoPor,
}

impl Concept {
    /// Campos aceitos em filtros de seleção, na ordem dos widgets originais.
    pub const FILTRAVEIS: &'static [Concept] = &[
        Concept::FechadoPor,
        Concept::Reclamacao,
        Concept::CriadoPor,
        Concept::Diagnostico,
    ];

    /// Nome canônico exposto na CLI e nos rótulos.
    pub fn nome(self) -> &'static str {
        match self {
            Concept::Status => "Status",
            Concept::FechadoPor => "Fechado por",
            Concept::Historico => "Histórico",
            Concept::Reclamacao => "Reclamação",
            Concept::CriadoPor => "Criado por",
            Concept::Diagnostico => "Diagnóstico",
            Concept::DataAbertura => "Data de abertura",
            Concept::HoraAbertura => "Hora de abertura",
            Concept::DataFechamento => "Data de fechamento",
            Concept::HoraFechamento => "Hora de fechamento",
            Concept::Situacao => "Situação",
            Concept::ModificadoPor => "Caso modificado pela última vez por",
        }
    }

    pub fn do_nome(nome: &str) -> Option<Concept> {
        Concept::FILTRAVEIS
            .iter()
            .copied()
            .find(|c| c.nome().eq_ignore_ascii_case(nome.trim()))
    }
}

/// Dicionário fixo conceito → coluna real do modo detectado, ou None quando
/// o conceito não existe no modo. Construído uma vez após a detecção e
/// somente lido depois disso.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldMap {
    modo: ReportMode,
}

impl FieldMap {
    pub fn new(modo: ReportMode) -> Self {
        FieldMap { modo }
    }

    pub fn coluna(&self, conceito: Concept) -> Option<&'static str> {
        use Concept::*;
        use ReportMode::*;
        match (self.modo, conceito) {
            (_, CriadoPor) => Some("Criado por"),
            (Enterprise, Status) => Some("Status"),
            (Enterprise, FechadoPor) => Some("Fechado por"),
            (Enterprise, Historico) => Some("Histórico"),
            (Enterprise, Reclamacao) => Some("Reclamação"),
            (Enterprise, Diagnostico) => Some("Diagnóstico"),
            (Enterprise, DataAbertura) => Some("Data de abertura"),
            (Enterprise, HoraAbertura) => Some("Hora de abertura"),
            (Enterprise, DataFechamento) => Some("Data de fechamento"),
            (Enterprise, HoraFechamento) => Some("Hora de fechamento"),
            (Consumer, Reclamacao) => Some("Assunto"),
            (Consumer, Diagnostico) => Some("Causa raiz"),
            (Consumer, DataAbertura) => Some("Data/Hora de abertura"),
            (Consumer, Situacao) => Some("Situação"),
            (Consumer, ModificadoPor) => Some("Caso modificado pela última vez por"),
            _ => None,
        }
    }
}

/// Esquema detectado de um arquivo: modo, mapa de campos e o conjunto de
/// conceitos cuja coluna mapeada existe de fato na tabela. Substitui o
/// rebranching por tipo de relatório em cada ponto de uso.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSchema {
    pub modo: ReportMode,
    pub field_map: FieldMap,
    presentes: BTreeSet<Concept>,
}

impl ReportSchema {
    pub fn detectar(tabela: &DataTable) -> Self {
        let modo = detectar_modo(tabela);
        let field_map = FieldMap::new(modo);
        let todos = [
            Concept::Status,
            Concept::FechadoPor,
            Concept::Historico,
            Concept::Reclamacao,
            Concept::CriadoPor,
            Concept::Diagnostico,
            Concept::DataAbertura,
            Concept::HoraAbertura,
            Concept::DataFechamento,
            Concept::HoraFechamento,
            Concept::Situacao,
            Concept::ModificadoPor,
        ];
        let presentes = todos
            .into_iter()
            .filter(|&c| field_map.coluna(c).is_some_and(|col| tabela.has(col)))
            .collect();
        ReportSchema {
            modo,
            field_map,
            presentes,
        }
    }

    /// Coluna mapeada do conceito, apenas se presente no arquivo carregado.
    pub fn coluna_presente(&self, conceito: Concept) -> Option<&'static str> {
        if self.presentes.contains(&conceito) {
            self.field_map.coluna(conceito)
        } else {
            None
        }
    }

    pub fn presente(&self, conceito: Concept) -> bool {
        self.presentes.contains(&conceito)
    }
}
