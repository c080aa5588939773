// Church Events
// Prints the filtered listing, then keeps the service countdown running

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use anyhow::{bail, Context, Result};
use tokio::sync::mpsc;

use church_events::models::filter::FilterDefaults;
use church_events::models::settings::ResendConfig;
use church_events::services::catalog::EventCatalog;
use church_events::services::countdown::{
    card_countdown, livestream_status, CountdownEngine, ResendCountdown,
};
use church_events::services::eligibility::{EligibilityCalculator, EvaluationStatus};
use church_events::services::filter::{FilterController, FilterEvaluator};
use church_events::services::settings::load_config_or_default;
use church_events::services::ticker::Ticker;
use church_events::utils::clock::{Clock, SystemClock};

#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    catalog: Option<PathBuf>,
    window: Option<String>,
    content_type: Option<String>,
    sub_types: Vec<String>,
    once: bool,
    resend: bool,
}

fn parse_args() -> Result<CliArgs> {
    let mut args = CliArgs::default();
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .with_context(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--config" => args.config = Some(PathBuf::from(value("--config")?)),
            "--catalog" => args.catalog = Some(PathBuf::from(value("--catalog")?)),
            "--window" => args.window = Some(value("--window")?),
            "--type" => args.content_type = Some(value("--type")?),
            "--sub-type" => args.sub_types.push(value("--sub-type")?),
            "--once" => args.once = true,
            "--resend" => args.resend = true,
            other => bail!(
                "unknown argument `{other}`\nusage: church-events [--config PATH] [--catalog PATH] \
                 [--window NAME] [--type all|services|events] [--sub-type TAG]... [--once] [--resend]"
            ),
        }
    }

    Ok(args)
}

/// Count the resend cool-down down to zero, then exit.
async fn run_resend(config: &ResendConfig, clock: Arc<dyn Clock>) -> Result<()> {
    let mut countdown = ResendCountdown::from_config(config);
    countdown.start(clock.now());
    let (ready_tx, mut ready_rx) = mpsc::unbounded_channel();

    let handle = countdown.spawn_ticker(config, clock, move |snapshot| {
        if snapshot.ready {
            let _ = ready_tx.send(());
        } else {
            println!("Resend code in {}s", snapshot.display_text);
        }
    });

    tokio::select! {
        _ = ready_rx.recv() => println!("Resend code available"),
        signal = tokio::signal::ctrl_c() => signal.context("failed to listen for Ctrl-C")?,
    }
    handle.stop().await.context("resend ticker failed")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    log::info!("Starting Church Events");

    let args = parse_args()?;
    let config = load_config_or_default(args.config.as_deref());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let catalog = match args.catalog.as_ref().or(config.catalog_path.as_ref()) {
        Some(path) => EventCatalog::load_from_path(path)?,
        None => {
            log::warn!("No catalog configured, the listing will be empty");
            EventCatalog::default()
        }
    };

    let defaults = FilterDefaults::upcoming().with_window(config.filter.default_window()?);
    let mut controller = FilterController::new(FilterEvaluator::new(catalog, defaults), clock.clone());

    if let Some(name) = &args.content_type {
        controller.set_content_type_name(name)?;
    }
    if let Some(name) = &args.window {
        controller.set_window(name)?;
    }
    for tag in &args.sub_types {
        controller.toggle_sub_type(tag)?;
    }

    let now = clock.now();
    let eligibility = EligibilityCalculator::new(config.filter.eligibility_months);
    let outcome = controller.outcome();
    println!("{} ({} shown)", outcome.summary_text, outcome.visible_count);

    for id in &outcome.visible_ids {
        let Some(record) = controller.evaluator().catalog().get(id) else {
            continue;
        };
        let footer = if record.occurs_at() > now {
            card_countdown(record.occurs_at(), now).display_text
        } else {
            match eligibility.status(record, now) {
                EvaluationStatus::Open { action_label } => action_label,
                EvaluationStatus::Closed { headline, .. } => headline,
            }
        };
        println!(
            "  {}  {:<8} {:<30} [{}]",
            record.occurs_at().format("%Y-%m-%d"),
            record.kind().label(),
            record.title(),
            footer
        );
    }
    if outcome.is_empty() {
        println!("  No items match the current filters.");
    }

    let live_window = config.countdown.live_window();
    println!("Livestream: {}", livestream_status(now, &live_window).label());

    if args.resend {
        return run_resend(&config.resend, clock).await;
    }
    if args.once {
        return Ok(());
    }

    let mut engine = CountdownEngine::from_config(&config.countdown, now);
    let handle = Ticker::spawn(
        "service-countdown",
        StdDuration::from_secs(config.countdown.tick_seconds),
        clock,
        move |now| {
            let snapshot = engine.tick(now);
            println!("Next service: {}", snapshot.display_text);
        },
    );

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    handle.stop().await.context("countdown ticker failed")?;
    log::info!("Shutting down");
    Ok(())
}
