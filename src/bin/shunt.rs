use shunt::{global_registry, Config, Evaluator};
use std::time::Instant;
use serde_json::json;
use tracing_subscriber::{fmt, EnvFilter};

fn print_usage() {
    eprintln!("Usage: shunt \"expression\" [options]");
    eprintln!("       shunt --list");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --precision N    Round the result to N decimal places (default 10, or $SHUNT_PRECISION)");
    eprintln!("  --output-json    Output result in JSON format with timing and the active config");
    eprintln!("  --list           Print every known operator, function and constant");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  shunt \"2 + 3 * 4\"");
    eprintln!("  shunt \"5+3/cos(sin(-6))^0.25\" --output-json");
    eprintln!("  shunt \"mean(1, 2, 3, 4)\" --precision 2");
}

fn main() {
    // RUST_LOG controls verbosity, warnings only by default
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        print_usage();
        std::process::exit(1);
    }

    // Parse arguments and flags
    let mut expr: Option<&str> = None;
    let mut config = Config::from_env();
    let mut output_json = false;
    let mut list = false;
    let mut i = 0;

    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--output-json" => output_json = true,
            "--list" => list = true,
            "--precision" => {
                let value = args.get(i + 1).and_then(|v| v.parse::<u32>().ok());
                match value {
                    Some(precision) => config.precision = precision,
                    None => {
                        eprintln!("Error: --precision requires a non-negative integer");
                        std::process::exit(1);
                    }
                }
                i += 1; // Skip the value
            }
            _ if expr.is_none() => expr = Some(arg),
            _ => {
                eprintln!("Unexpected argument: '{}'", arg);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if list {
        for name in global_registry().operator_list() {
            println!("{}", name);
        }
        if expr.is_none() {
            return;
        }
    }

    let Some(expr) = expr else {
        print_usage();
        std::process::exit(1);
    };

    let start_time = Instant::now();
    let result = Evaluator::with_config(global_registry(), config).evaluate(expr);
    let execution_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    match result {
        Ok(value) => {
            if output_json {
                println!("{}", format_json_output(expr, value, &config, execution_time_ms));
            } else {
                println!("{}", value);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

fn format_json_output(expr: &str, value: f64, config: &Config, execution_time_ms: f64) -> String {
    // JSON has no representation for inf or NaN
    let result = if value.is_finite() { json!(value) } else { json!(value.to_string()) };
    let output = json!({
        "expression": expr,
        "result": result,
        "config": config,
        "execution_time": format!("{:.2} ms", execution_time_ms)
    });

    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}
