// Interactive Diagnosis Console
//
// Purpose: Read symptom descriptions from stdin until the exit keyword or EOF
// Usage: cargo run --features cli --bin diagnose_cli [path/to/diseases.csv]

use anyhow::Context;
use cotton_diagnosis::{Diagnoser, DiagnosisOutcome, KnowledgeBase, PipelineConfig};
use std::io::{self, BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with the prompt
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cotton_diagnosis=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let disease_data = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("DISEASE_DATA").ok())
        .unwrap_or_else(|| "data/doencas_algodoeiro.csv".to_string());

    let config = match std::env::var("PIPELINE_CONFIG") {
        Ok(path) => PipelineConfig::load(std::path::Path::new(&path))?,
        Err(_) => PipelineConfig::default(),
    };

    let kb = KnowledgeBase::load(&disease_data)?;
    let diagnoser = Diagnoser::new(kb, config)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    println!("Diagnóstico de doenças do algodoeiro");
    loop {
        print!(
            "\nDescreva os sintomas (ou '{}' para encerrar): ",
            diagnoser.config().exit_keyword
        );
        stdout.flush().context("Failed to flush stdout")?;

        line.clear();
        if stdin.lock().read_line(&mut line).context("Failed to read stdin")? == 0 {
            break;
        }

        match diagnoser.diagnose(&line)? {
            DiagnosisOutcome::Exit => break,
            DiagnosisOutcome::Diagnosis { disease, description } => {
                println!("Doença provável: {}", disease);
                println!("Descrição: {}", description);
            }
            rejected => println!("{}", rejected.message()),
        }
    }

    println!("Encerrando.");
    Ok(())
}
