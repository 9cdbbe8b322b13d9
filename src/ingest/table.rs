use std::collections::HashMap;

/// Tabela em memória com acesso às células por nome de coluna.
/// Os cabeçalhos são aparados na construção; linhas curtas são completadas
/// com células vazias para que todo acesso por índice seja válido.
#[derive(Debug, Clone)]
pub struct DataTable {
    headers: Vec<String>,
    indices: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl DataTable {
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();
        let mut indices = HashMap::new();
        for (i, h) in headers.iter().enumerate() {
            indices.entry(h.clone()).or_insert(i);
        }
        for row in &mut rows {
            row.resize(headers.len(), String::new());
        }
        DataTable {
            headers,
            indices,
            rows,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has(&self, col: &str) -> bool {
        self.indices.contains_key(col)
    }

    /// Valor bruto da célula, ou None se a coluna não existe.
    pub fn get(&self, row: usize, col: &str) -> Option<&str> {
        let &i = self.indices.get(col)?;
        self.rows.get(row).and_then(|r| r.get(i)).map(String::as_str)
    }

    /// Valor da célula com célula vazia tratada como ausente.
    pub fn get_non_empty(&self, row: usize, col: &str) -> Option<&str> {
        self.get(row, col).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, row: usize, col: &str, valor: String) {
        if let Some(&i) = self.indices.get(col) {
            if let Some(r) = self.rows.get_mut(row) {
                r[i] = valor;
            }
        }
    }

    /// Apara espaços de todas as células.
    pub fn trim_cells(&mut self) {
        for row in &mut self.rows {
            for cell in row.iter_mut() {
                let aparado = cell.trim();
                if aparado.len() != cell.len() {
                    *cell = aparado.to_string();
                }
            }
        }
    }
}
