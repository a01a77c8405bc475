use commission_catalog::pipeline::StatusLevel;

use super::Context;
use crate::output;

pub async fn probe(ctx: &Context) -> anyhow::Result<()> {
    let report = ctx.orchestrator.probe().await;

    if ctx.json {
        return output::print_json(&report);
    }

    let first = ctx.orchestrator.attempts().first();
    if let Some(attempt) = first {
        println!("{} {}{}", attempt.method, ctx.orchestrator.origin(), attempt.path);
    }
    match report.status {
        Some(status) => println!("Status:  {status}"),
        None => println!("Status:  no response"),
    }
    println!("Success: {}", report.success);
    if let Some(error) = &report.error {
        println!("Error:   {error}");
    }
    match &report.decoded_body {
        Some(body) => println!("{}", serde_json::to_string_pretty(body)?),
        None if !report.raw_text.is_empty() => println!("{}", report.raw_text),
        None => {}
    }
    Ok(())
}

pub async fn status(ctx: &Context) -> anyhow::Result<()> {
    let status = ctx.orchestrator.check_status().await;

    if ctx.json {
        return output::print_json(&status);
    }

    let label = match status.level {
        StatusLevel::Ok => "OK",
        StatusLevel::Warning => "WARNING",
        StatusLevel::Error => "ERROR",
    };
    println!("[{label}] {}", status.message);
    println!("  {}", status.details);
    Ok(())
}
