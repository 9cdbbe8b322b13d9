use crate::error::AppError;
use crate::report::Dashboard;

/// Linhas brutas da visão filtrada em CSV UTF-8 com `;`.
pub fn gerar_csv(dash: &Dashboard) -> Result<Vec<u8>, AppError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());
    wtr.write_record(&dash.cabecalhos)?;
    for linha in &dash.linhas_filtradas {
        wtr.write_record(linha)?;
    }
    wtr.into_inner()
        .map_err(|e| AppError::Custom(e.to_string()))
}
