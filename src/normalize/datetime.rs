use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const FORMATOS_DATA_HORA: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d-%m-%Y %H:%M",
];

const FORMATOS_DATA: &[&str] = &["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y"];

const FORMATOS_HORA: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Data+hora nos formatos dos exports (brasileiro e ISO). Valor vazio ou
/// fora de formato vira None.
pub fn parse_data_hora(s: &str) -> Option<NaiveDateTime> {
    let aparado = s.trim();
    if aparado.is_empty() {
        return None;
    }
    FORMATOS_DATA_HORA
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(aparado, f).ok())
}

pub fn parse_data(s: &str) -> Option<NaiveDate> {
    let aparado = s.trim();
    if aparado.is_empty() {
        return None;
    }
    FORMATOS_DATA
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(aparado, f).ok())
}

pub fn parse_hora(s: &str) -> Option<NaiveTime> {
    let aparado = s.trim();
    if aparado.is_empty() {
        return None;
    }
    FORMATOS_HORA
        .iter()
        .find_map(|f| NaiveTime::parse_from_str(aparado, f).ok())
}

/// Combina uma célula de data (ou data+hora combinada) com uma célula de
/// hora opcional. Hora ausente ou inválida assume meia-noite.
pub fn combinar(data: &str, hora: Option<&str>) -> Option<NaiveDateTime> {
    if let Some(dt) = parse_data_hora(data) {
        return Some(dt);
    }
    let d = parse_data(data)?;
    let h = hora
        .and_then(parse_hora)
        .unwrap_or_else(|| NaiveTime::from_hms_opt(0, 0, 0).expect("meia-noite"));
    Some(d.and_time(h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_hora_brasileira() {
        let dt = parse_data_hora("05/01/2024 16:24").unwrap();
        assert_eq!(dt.format("%Y-%m-%dT%H:%M:%S").to_string(), "2024-01-05T16:24:00");
    }

    #[test]
    fn test_data_hora_com_segundos() {
        let dt = parse_data_hora("05/01/2024 16:24:30").unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "16:24:30");
    }

    #[test]
    fn test_data_hora_iso() {
        assert!(parse_data_hora("2024-01-05 16:24:00").is_some());
    }

    #[test]
    fn test_data_hora_vazia_ou_invalida() {
        assert!(parse_data_hora("").is_none());
        assert!(parse_data_hora("   ").is_none());
        assert!(parse_data_hora("não é data").is_none());
    }

    #[test]
    fn test_parse_data() {
        assert_eq!(
            parse_data("05/01/2024"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(
            parse_data("2024-01-05"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert!(parse_data("31/02/2024").is_none());
    }

    #[test]
    fn test_combinar_data_e_hora() {
        let dt = combinar("05/01/2024", Some("08:30")).unwrap();
        assert_eq!(dt.format("%Y-%m-%dT%H:%M:%S").to_string(), "2024-01-05T08:30:00");
    }

    #[test]
    fn test_combinar_sem_hora_assume_meia_noite() {
        let dt = combinar("05/01/2024", None).unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "00:00:00");
    }

    #[test]
    fn test_combinar_coluna_combinada() {
        // modo Consumer: "Data/Hora de abertura" traz tudo numa célula
        let dt = combinar("05/01/2024 16:24", None).unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "16:24");
    }

    #[test]
    fn test_combinar_data_invalida() {
        assert!(combinar("xx/yy/zzzz", Some("08:30")).is_none());
    }
}
