use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use encoding_rs_io::DecodeReaderBytesBuilder;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::ingest::table::DataTable;

/// Codificação do arquivo CSV. Os exports de chamados chegam em Latin-1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Codificacao {
    Latin1,
    Utf8,
}

impl Codificacao {
    fn encoding(self) -> &'static Encoding {
        match self {
            Codificacao::Latin1 => WINDOWS_1252,
            Codificacao::Utf8 => UTF_8,
        }
    }
}

/// Detecta o delimitador pela primeira linha: o candidato mais frequente
/// entre `;`, `,` e tab. Empate ou nenhuma ocorrência cai em `;`.
fn sniff_delimiter(primeira_linha: &str) -> u8 {
    let candidatos = [b';', b',', b'\t'];
    let mut melhor = b';';
    let mut melhor_qtd = 0usize;
    for &c in &candidatos {
        let qtd = primeira_linha.bytes().filter(|&b| b == c).count();
        if qtd > melhor_qtd {
            melhor = c;
            melhor_qtd = qtd;
        }
    }
    melhor
}

/// Carrega um CSV de qualquer fonte `Read`, decodificando a codificação
/// indicada. Linhas malformadas são puladas com aviso, como nos imports
/// interativos.
pub fn load_csv_reader<R: Read>(
    reader: R,
    codificacao: Codificacao,
    delimitador: Option<u8>,
) -> Result<DataTable, AppError> {
    let mut decodificado = String::new();
    // um BOM presente vence a codificação pedida e é descartado
    let mut transcoder = DecodeReaderBytesBuilder::new()
        .encoding(Some(codificacao.encoding()))
        .bom_override(true)
        .build(reader);
    transcoder.read_to_string(&mut decodificado)?;

    if decodificado.trim().is_empty() {
        return Err(AppError::ArquivoVazio);
    }

    let primeira_linha = decodificado.lines().next().unwrap_or("");
    let delim = delimitador.unwrap_or_else(|| sniff_delimiter(primeira_linha));
    debug!(delimitador = %(delim as char), "lendo CSV");

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(decodificado.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(AppError::ArquivoVazio);
    }

    let mut rows = Vec::new();
    let mut puladas = 0usize;
    for (i, resultado) in rdr.records().enumerate() {
        match resultado {
            Ok(record) => rows.push(record.iter().map(str::to_string).collect()),
            Err(err) => {
                warn!(linha = i + 2, %err, "linha malformada pulada");
                puladas += 1;
            }
        }
    }
    if puladas > 0 {
        warn!(puladas, "linhas puladas na leitura do CSV");
    }

    Ok(DataTable::new(headers, rows))
}

pub fn load_csv(
    path: &Path,
    codificacao: Codificacao,
    delimitador: Option<u8>,
) -> Result<DataTable, AppError> {
    let file = File::open(path)?;
    load_csv_reader(BufReader::new(file), codificacao, delimitador)
}

fn celula_para_texto(dado: &Data) -> String {
    match dado {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%d/%m/%Y %H:%M:%S").to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{:?}", e),
    }
}

/// Carrega uma planilha XLSX/XLS. Sem `aba`, usa a primeira.
pub fn load_xlsx(path: &Path, aba: Option<&str>) -> Result<DataTable, AppError> {
    let mut workbook = open_workbook_auto(path)?;
    let nomes = workbook.sheet_names();
    let nome = match aba {
        Some(n) => {
            if !nomes.iter().any(|s| s == n) {
                return Err(AppError::AbaNaoEncontrada(n.to_string()));
            }
            n.to_string()
        }
        None => nomes.first().cloned().ok_or(AppError::ArquivoVazio)?,
    };
    debug!(aba = %nome, "lendo planilha");

    let range = workbook.worksheet_range(&nome)?;
    let mut linhas = range.rows();
    let headers: Vec<String> = linhas
        .next()
        .ok_or(AppError::ArquivoVazio)?
        .iter()
        .map(celula_para_texto)
        .collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(AppError::ArquivoVazio);
    }
    let rows: Vec<Vec<String>> = linhas
        .map(|linha| linha.iter().map(celula_para_texto).collect())
        .collect();

    Ok(DataTable::new(headers, rows))
}

/// Despacha pela extensão do arquivo: `.csv` ou planilha Excel.
pub fn load_auto(
    path: &Path,
    aba: Option<&str>,
    codificacao: Codificacao,
    delimitador: Option<u8>,
) -> Result<DataTable, AppError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "csv" | "txt" => load_csv(path, codificacao, delimitador),
        "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => load_xlsx(path, aba),
        outro => Err(AppError::FormatoNaoSuportado(outro.to_string())),
    }
}
