use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de entrada/saída: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Erro ao ler planilha: {0}")]
    Planilha(#[from] calamine::Error),

    #[error("Erro ao gravar Excel: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Erro de serialização: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Aba não encontrada: {0}")]
    AbaNaoEncontrada(String),

    #[error("Formato de arquivo não suportado: {0}")]
    FormatoNaoSuportado(String),

    #[error("Arquivo vazio ou sem dados")]
    ArquivoVazio,

    #[error("Campo de filtro desconhecido: {0}")]
    CampoFiltroDesconhecido(String),

    #[error("{0}")]
    Custom(String),
}
