pub mod csv_report;
pub mod html_report;
pub mod xlsx_report;

pub use csv_report::gerar_csv;
pub use html_report::gerar_html;
pub use xlsx_report::gerar_xlsx;

use rust_xlsxwriter::{Format, FormatBorder};

/// Cabeçalho azul, texto branco, negrito, borda fina.
pub fn formato_cabecalho() -> Format {
    Format::new()
        .set_bold()
        .set_background_color("2C5F8A")
        .set_font_color("FFFFFF")
        .set_font_size(11)
        .set_border(FormatBorder::Thin)
        .set_text_wrap()
}

pub fn formato_inteiro() -> Format {
    Format::new().set_num_format("#,##0")
}

pub fn formato_decimal() -> Format {
    Format::new().set_num_format("#,##0.00")
}

pub fn formato_percentual() -> Format {
    Format::new().set_num_format("0.0%")
}
