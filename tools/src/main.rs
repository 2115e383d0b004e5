//! scenario-runner: headless driver for the ad-spend scenario engine.
//!
//! Usage:
//!   scenario-runner --db run.db --data-dir ./data --budgets 35,50,75,85
//!   scenario-runner --budgets 35,50,75,85 --commit
//!   scenario-runner --ipc-mode

use adspend_core::{
    config::EngineConfig,
    scoring::LinearModelScorer,
    session::ScenarioSession,
    store::ScenarioStore,
    types::{Budgets, CombinedRow, Period, ScenarioResult},
};
use anyhow::Result;
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    SetBudgets { budgets: Budgets },
    Simulate,
    Commit,
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    session_id:      String,
    budgets:         Budgets,
    scenario_period: Period,
    result:          ScenarioResult,
    combined:        Vec<CombinedRow>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let do_commit = args.iter().any(|a| a == "--commit");
    let db = arg_value(&args, "--db").unwrap_or(":memory:");
    let data_dir = arg_value(&args, "--data-dir").unwrap_or("./data");

    if !ipc_mode {
        println!("Ad Spend Optimizer — scenario-runner");
        println!("  db:        {db}");
        println!("  data_dir:  {data_dir}");
        println!();
    }

    let config = EngineConfig::load(data_dir)?;
    let store = if db == ":memory:" {
        ScenarioStore::in_memory()?
    } else {
        ScenarioStore::open(db)?
    };
    store.migrate()?;
    store.seed_history(&config.seed_history)?;

    let scorer = Box::new(LinearModelScorer::new(&config.model));
    let mut session = ScenarioSession::new(store, scorer)?;

    if ipc_mode {
        run_ipc_loop(&mut session)?;
        return Ok(());
    }

    if let Some(raw) = arg_value(&args, "--budgets") {
        session.set_budgets(parse_budgets(raw)?);
    }

    let state = build_ui_state(&mut session)?;
    println!("{}", serde_json::to_string_pretty(&state)?);

    if do_commit {
        let period = session.commit()?;
        println!("Committed scenario as {period}.");
    }

    Ok(())
}

fn run_ipc_loop(session: &mut ScenarioSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let reply = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::SetBudgets { budgets } => {
                session.set_budgets(budgets);
                ui_state_json(session)
            }
            IpcCommand::Simulate | IpcCommand::GetState => ui_state_json(session),
            IpcCommand::Commit => match session.commit() {
                Ok(period) => serde_json::json!({ "committed": period.label() }),
                Err(e) => serde_json::json!({ "error": e.to_string() }),
            },
        };

        writeln!(stdout, "{}", reply)?;
        stdout.flush()?;
    }
    Ok(())
}

/// One interaction surfaced as JSON; engine errors go to the UI verbatim.
fn ui_state_json(session: &mut ScenarioSession) -> serde_json::Value {
    match build_ui_state(session) {
        Ok(state) => serde_json::to_value(&state)
            .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() })),
        Err(e) => serde_json::json!({ "error": e.to_string() }),
    }
}

fn build_ui_state(session: &mut ScenarioSession) -> Result<UiState> {
    let (result, combined) = session.simulate()?;
    let scenario_period = combined
        .iter()
        .find(|row| row.synthetic)
        .map(|row| row.period)
        .expect("combined series always carries synthetic rows");
    Ok(UiState {
        session_id: session.session_id().to_string(),
        budgets: session.budgets(),
        scenario_period,
        result,
        combined,
    })
}

fn arg_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn parse_budgets(raw: &str) -> Result<Budgets> {
    let values: Vec<u32> = raw
        .split(',')
        .map(|part| part.trim().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| anyhow::anyhow!("Cannot parse --budgets '{raw}': {e}"))?;
    let budgets: Budgets = values
        .try_into()
        .map_err(|_| anyhow::anyhow!("--budgets needs exactly 4 values"))?;
    Ok(budgets)
}
