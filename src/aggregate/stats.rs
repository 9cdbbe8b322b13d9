/// Helpers numéricos compartilhados pelos agregadores.

/// Média aritmética. Retorna 0.0 para fatia vazia — os agregadores nunca
/// propagam NaN para a apresentação.
pub fn media(valores: &[f64]) -> f64 {
    if valores.is_empty() {
        return 0.0;
    }
    valores.iter().sum::<f64>() / valores.len() as f64
}

/// Percentual de `parte` sobre `total`, com divisão por zero degradando
/// para 0.0.
pub fn pct(parte: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        parte as f64 / total as f64 * 100.0
    }
}

pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
