use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use dash_chamados::config::{DashboardConfig, OpenPolicy};
use dash_chamados::export::{gerar_csv, gerar_html, gerar_xlsx};
use dash_chamados::filter::FilterSet;
use dash_chamados::ingest::{load_auto, Codificacao};
use dash_chamados::report::gerar_dashboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Formato {
    Html,
    Xlsx,
    Csv,
}

impl Formato {
    fn extensao(self) -> &'static str {
        match self {
            Formato::Html => "html",
            Formato::Xlsx => "xlsx",
            Formato::Csv => "csv",
        }
    }
}

/// Painel de chamados NMC: lê um relatório exportado (CSV ou Excel),
/// detecta o esquema, aplica filtros e imprime/exporta o resumo.
#[derive(Debug, Parser)]
#[command(name = "dash-chamados", version, about)]
struct Args {
    /// Arquivo de entrada (.csv, .txt, .xlsx, .xls, .xlsm, .xlsb, .ods).
    arquivo: PathBuf,

    /// Nome da aba da planilha (padrão: primeira aba).
    #[arg(long)]
    planilha: Option<String>,

    /// Delimitador do CSV; detectado pela primeira linha quando omitido.
    #[arg(long)]
    delimitador: Option<char>,

    /// Codificação do CSV de entrada.
    #[arg(long, value_enum, default_value = "latin1")]
    codificacao: Codificacao,

    /// Filtro no formato "Campo=valor1,valor2". Repetível; os campos se
    /// combinam por E lógico.
    #[arg(long = "filtro")]
    filtros: Vec<String>,

    /// Regra de contagem de chamados abertos (sobrepõe a configuração).
    #[arg(long, value_enum)]
    politica: Option<OpenPolicy>,

    /// Formato de exportação do painel.
    #[arg(long, value_enum)]
    exportar: Option<Formato>,

    /// Arquivo de saída da exportação (padrão: dashboard.<ext>).
    #[arg(long, requires = "exportar")]
    saida: Option<PathBuf>,

    /// Configuração JSON (sentinelas, rótulos, política).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DashboardConfig::carregar(path)
            .with_context(|| format!("falha ao ler a configuração {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(politica) = args.politica {
        config.politica_abertos = politica;
    }

    let mut filtros = FilterSet::new();
    for arg in &args.filtros {
        let (campo, valores) = FilterSet::parse_arg(arg)?;
        filtros.adicionar(campo, valores);
    }

    let tabela = load_auto(
        &args.arquivo,
        args.planilha.as_deref(),
        args.codificacao,
        args.delimitador.map(|c| c as u8),
    )
    .with_context(|| format!("falha ao carregar {}", args.arquivo.display()))?;

    let dash = gerar_dashboard(tabela, &filtros, &config)?;

    println!("== {} ==", dash.titulo);
    println!("Total de chamados: {}", dash.resumo.contagem.total);
    println!(
        "Abertos: {} ({:.1}%)",
        dash.resumo.contagem.abertos, dash.resumo.contagem.pct_abertos
    );
    println!(
        "Fechados: {} ({:.1}%)",
        dash.resumo.contagem.fechados, dash.resumo.contagem.pct_fechados
    );
    println!(
        "Tempo médio total (min): {:.2}",
        dash.resumo.tempo_medio_minutos
    );
    println!(
        "Maior ofensor: {} - {} ({:.1}%)",
        dash.resumo.maior_ofensor.rotulo,
        dash.resumo.maior_ofensor.qtd,
        dash.resumo.maior_ofensor.pct
    );
    if dash.stats.auto_closer.falhas > 0 {
        println!(
            "Aviso: {} fechamento(s) automático(s) sem responsável identificável no histórico",
            dash.stats.auto_closer.falhas
        );
    }

    for tabela in &dash.tabelas {
        println!();
        println!("{}", tabela.titulo);
        for linha in &tabela.linhas {
            println!("  {:<40} {:>6} {:>6.1}%", linha.rotulo, linha.qtd, linha.pct);
        }
    }

    if let Some(formato) = args.exportar {
        let saida = args
            .saida
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("dashboard.{}", formato.extensao())));
        let bytes = match formato {
            Formato::Html => gerar_html(&dash).into_bytes(),
            Formato::Xlsx => gerar_xlsx(&dash)?,
            Formato::Csv => gerar_csv(&dash)?,
        };
        fs::write(&saida, bytes)
            .with_context(|| format!("falha ao gravar {}", saida.display()))?;
        info!(arquivo = %saida.display(), "painel exportado");
    }

    Ok(())
}
