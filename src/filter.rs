use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::AppError;
use crate::normalize::Chamado;
use crate::schema::Concept;

/// Conjunto de filtros por campo categórico. Seleção vazia ou ausente para
/// um campo significa "sem filtro"; os campos compõem por interseção.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    criterios: BTreeMap<Concept, BTreeSet<String>>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acrescenta valores permitidos para um campo. Conjuntos vazios são
    /// ignorados, espelhando o multiselect sem seleção.
    pub fn adicionar(&mut self, campo: Concept, valores: impl IntoIterator<Item = String>) {
        let valores: BTreeSet<String> = valores.into_iter().collect();
        if !valores.is_empty() {
            self.criterios.entry(campo).or_default().extend(valores);
        }
    }

    pub fn com(mut self, campo: Concept, valores: impl IntoIterator<Item = String>) -> Self {
        self.adicionar(campo, valores);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.criterios.is_empty()
    }

    /// Interpreta um argumento `Campo=valor1,valor2` da CLI.
    pub fn parse_arg(arg: &str) -> Result<(Concept, Vec<String>), AppError> {
        let (campo, valores) = arg
            .split_once('=')
            .ok_or_else(|| AppError::CampoFiltroDesconhecido(arg.to_string()))?;
        let conceito = Concept::do_nome(campo)
            .ok_or_else(|| AppError::CampoFiltroDesconhecido(campo.trim().to_string()))?;
        let valores = valores
            .split(',')
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        Ok((conceito, valores))
    }

    /// O registro passa por todos os critérios? Para Diagnóstico o valor
    /// ausente casa com o rótulo de não informado, como no preenchimento
    /// feito antes do filtro original; nos demais campos ausente nunca casa.
    pub fn aceita(&self, chamado: &Chamado, rotulo_nao_informado: &str) -> bool {
        self.criterios.iter().all(|(&campo, permitidos)| {
            let valor = match chamado.campo(campo) {
                Some(v) => v,
                None if campo == Concept::Diagnostico => rotulo_nao_informado,
                None => return false,
            };
            permitidos.contains(valor)
        })
    }

    pub fn aplicar(&self, chamados: &[Chamado], rotulo_nao_informado: &str) -> Vec<Chamado> {
        if self.is_empty() {
            return chamados.to_vec();
        }
        let filtrados: Vec<Chamado> = chamados
            .iter()
            .filter(|c| self.aceita(c, rotulo_nao_informado))
            .cloned()
            .collect();
        if filtrados.is_empty() && !chamados.is_empty() {
            debug!("filtros resultaram em conjunto vazio");
        }
        filtrados
    }
}

/// Valores distintos não ausentes de um campo, ordenados — a lista de
/// opções de um widget de seleção.
pub fn opcoes(chamados: &[Chamado], campo: Concept) -> Vec<String> {
    let distintos: BTreeSet<&str> = chamados.iter().filter_map(|c| c.campo(campo)).collect();
    distintos.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chamado(criado_por: &str, diagnostico: Option<&str>, reclamacao: &str) -> Chamado {
        Chamado {
            linha: 0,
            status: Some("Aberto".into()),
            situacao: None,
            fechado_por: None,
            reclamacao: Some(reclamacao.into()),
            criado_por: Some(criado_por.into()),
            diagnostico: diagnostico.map(str::to_string),
            modificado_por: None,
            abertura: None,
            fechamento: None,
        }
    }

    fn base() -> Vec<Chamado> {
        vec![
            chamado("Ana", Some("Rede"), "Lentidão"),
            chamado("Bruno", Some("Energia"), "Queda"),
            chamado("Ana", None, "Queda"),
        ]
    }

    #[test]
    fn test_sem_filtro_mantem_tudo() {
        let f = FilterSet::new();
        assert_eq!(f.aplicar(&base(), "Não informado").len(), 3);
    }

    #[test]
    fn test_filtro_simples() {
        let f = FilterSet::new().com(Concept::CriadoPor, ["Ana".to_string()]);
        assert_eq!(f.aplicar(&base(), "Não informado").len(), 2);
    }

    #[test]
    fn test_filtros_compoem_por_intersecao() {
        let f = FilterSet::new()
            .com(Concept::CriadoPor, ["Ana".to_string()])
            .com(Concept::Reclamacao, ["Queda".to_string()]);
        let resultado = f.aplicar(&base(), "Não informado");
        assert_eq!(resultado.len(), 1);
        assert_eq!(resultado[0].criado_por.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_selecao_vazia_ignorada() {
        let f = FilterSet::new().com(Concept::CriadoPor, Vec::<String>::new());
        assert!(f.is_empty());
        assert_eq!(f.aplicar(&base(), "Não informado").len(), 3);
    }

    #[test]
    fn test_diagnostico_ausente_casa_com_rotulo() {
        let f = FilterSet::new().com(Concept::Diagnostico, ["Não informado".to_string()]);
        let resultado = f.aplicar(&base(), "Não informado");
        assert_eq!(resultado.len(), 1);
        assert!(resultado[0].diagnostico.is_none());
    }

    #[test]
    fn test_outros_campos_ausentes_nunca_casam() {
        let f = FilterSet::new().com(Concept::FechadoPor, ["Ana".to_string()]);
        assert!(f.aplicar(&base(), "Não informado").is_empty());
    }

    #[test]
    fn test_filtro_pode_esvaziar_resultado() {
        let f = FilterSet::new().com(Concept::CriadoPor, ["Zeca".to_string()]);
        assert!(f.aplicar(&base(), "Não informado").is_empty());
    }

    #[test]
    fn test_parse_arg() {
        let (campo, valores) = FilterSet::parse_arg("Criado por=Ana, Bruno").unwrap();
        assert_eq!(campo, Concept::CriadoPor);
        assert_eq!(valores, vec!["Ana".to_string(), "Bruno".to_string()]);
    }

    #[test]
    fn test_parse_arg_campo_desconhecido() {
        assert!(matches!(
            FilterSet::parse_arg("Inexistente=x"),
            Err(AppError::CampoFiltroDesconhecido(_))
        ));
        assert!(matches!(
            FilterSet::parse_arg("sem igual"),
            Err(AppError::CampoFiltroDesconhecido(_))
        ));
    }

    #[test]
    fn test_opcoes() {
        assert_eq!(opcoes(&base(), Concept::CriadoPor), vec!["Ana", "Bruno"]);
        assert_eq!(
            opcoes(&base(), Concept::Diagnostico),
            vec!["Energia", "Rede"],
            "valores ausentes não entram nas opções"
        );
    }
}
