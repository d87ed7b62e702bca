//! CLI baccarat advisor example.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::sync::Arc;

use bacrs::i18n::{self, TextKey};
use bacrs::{
    Advisor, Currency, EndReason, Language, MemoryStore, RiskMonitor, RoundReport,
    SessionOptions, SessionState,
};
use tracing_subscriber::EnvFilter;

const HELP: &str = "Commands:
  <player> <banker>  record a round, e.g. '7 3'
  risk               show risk figures
  exposure           show a losing martingale run
  pause | resume     pause or resume the session
  end                end the session
  reset              start over with the same settings
  lang <ja|en>       switch display language
  currency <code>    switch currency (JPY, USD, EUR, KRW, CNY); restarts the bankroll
  save | load        save or restore settings
  q                  quit";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bacrs=info")),
        )
        .init();

    println!("Baccarat advisor CLI example (type 'help' for commands)");

    let options = SessionOptions::default().with_language(Language::En);
    let advisor = match Advisor::new(options) {
        Ok(advisor) => Arc::new(advisor),
        Err(err) => {
            println!("Invalid options: {err}");
            return;
        }
    };

    let _monitor = match RiskMonitor::start_default(Arc::clone(&advisor)) {
        Ok(monitor) => Some(monitor),
        Err(err) => {
            println!("Risk monitor unavailable: {err}");
            None
        }
    };

    advisor.subscribe(|next, previous, _| {
        if next.paused && !previous.paused {
            println!("Session paused.");
        }
    });

    let mut storage = MemoryStore::new();

    loop {
        print_status(&advisor.state());

        let input = prompt_line("> ");
        let words: Vec<&str> = input.split_whitespace().collect();

        match words.as_slice() {
            [] => {}
            ["q" | "quit"] => {
                println!("Goodbye.");
                break;
            }
            ["help"] => println!("{HELP}"),
            ["risk"] => print_risk(&advisor),
            ["exposure"] => print_exposure(&advisor),
            ["pause"] => report_control(advisor.pause()),
            ["resume"] => report_control(advisor.resume()),
            ["end"] => {
                if !advisor.end_session(EndReason::Manual) {
                    println!("Session already ended.");
                }
            }
            ["reset"] => advisor.reset(),
            ["lang", code] => match Language::from_code(code) {
                Some(language) => {
                    let options = advisor.state().options.with_language(language);
                    if let Err(err) = advisor.configure(options) {
                        println!("Settings error: {err}");
                    }
                }
                None => println!("Unknown language."),
            },
            ["currency", code] => match Currency::from_code(code) {
                Some(currency) => match advisor.switch_currency(currency) {
                    Ok(_) => println!(
                        "Currency: {}",
                        i18n::currency_name(advisor.state().options.language, currency)
                    ),
                    Err(err) => println!("Settings error: {err}"),
                },
                None => println!("Unknown currency."),
            },
            ["save"] => match advisor.save_settings(&mut storage) {
                Ok(()) => println!("Settings saved."),
                Err(err) => println!("Save error: {err}"),
            },
            ["load"] => match advisor.load_settings(&storage) {
                Ok(true) => println!("Settings loaded."),
                Ok(false) => println!("No saved settings."),
                Err(err) => println!("Load error: {err}"),
            },
            [player, banker] => match (player.parse::<u8>(), banker.parse::<u8>()) {
                (Ok(player), Ok(banker)) => match advisor.submit_round(player, banker) {
                    Ok(report) => print_report(&report),
                    Err(err) => println!("Round error: {err}"),
                },
                _ => println!("Please enter two scores."),
            },
            _ => println!("Unknown command."),
        }
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::from("q");
    }
    if input.is_empty() {
        // EOF
        return String::from("q");
    }
    input.trim().to_lowercase()
}

fn report_control(result: Result<(), bacrs::ControlError>) {
    if let Err(err) = result {
        println!("{err}");
    }
}

fn print_status(state: &SessionState) {
    let SessionOptions {
        language, currency, ..
    } = state.options;
    let metrics = state.metrics();
    println!(
        "\nRound {} | bankroll {} ({:+.1}%) | next bet {}",
        state.history.len(),
        i18n::format_amount(currency, state.bankroll),
        metrics.profit_percent,
        i18n::format_amount(currency, state.bet_amount),
    );
    println!(
        "Suggestion: {}",
        i18n::describe_suggestion(language, currency, &bacrs::staking::suggest(state))
    );
}

fn print_report(report: &RoundReport) {
    let language = report.state.options.language;
    let currency = report.state.options.currency;
    let round = &report.round;
    println!(
        "Round {}: {} ({})",
        round.round,
        i18n::winner_label(language, round.winner),
        i18n::diff_label(language, round.diff_type),
    );

    if let Some(resolution) = report.resolution {
        println!(
            "Bet on {}: {:?} {} -> bankroll {}",
            i18n::side_label(language, resolution.side),
            resolution.outcome,
            i18n::format_amount(currency, resolution.amount),
            i18n::format_amount(currency, resolution.bankroll),
        );
    }
    if report.ties_cleared > 0 {
        println!("{} x{} cleared.", i18n::text(language, TextKey::Tie), report.ties_cleared);
    }
    if let Some(verification) = report.verification {
        println!("Pattern check: {:?}", verification.reason);
    }
    if report.loss_limit_reached {
        println!("Loss limit reached. Session ended.");
    }
}

fn print_risk(advisor: &Advisor) {
    let language = advisor.state().options.language;
    let snapshot = advisor.risk_snapshot();
    let assessment = advisor.assess_risk();

    println!(
        "Funds {:.1}% | loss {:.1}% | level {} | score {:.1} ({})",
        snapshot.funds_ratio,
        snapshot.loss_percentage,
        i18n::risk_level_label(language, snapshot.risk_level),
        assessment.score,
        i18n::risk_band_label(language, assessment.band),
    );
    for warning in snapshot.warnings {
        println!("  ! {}", i18n::warning_label(language, warning));
    }
}

fn print_exposure(advisor: &Advisor) {
    let currency = advisor.state().options.currency;
    let exposure = advisor.martingale_exposure(bacrs::risk::DEFAULT_EXPOSURE_STEPS);
    for step in &exposure.breakdown {
        println!(
            "{:>2}: bet {:>10} | total {:>10} | left {:>10} | {:.1}%",
            step.round,
            i18n::format_compact(currency, step.bet_amount),
            i18n::format_compact(currency, step.total_loss),
            i18n::format_compact(currency, step.remaining_funds),
            step.risk_percentage,
        );
    }
    println!(
        "{} losses cost {} ({:.1}% of bankroll)",
        exposure.max_consecutive_losses,
        i18n::format_amount(currency, exposure.total_risk_amount),
        exposure.risk_percentage,
    );
}
