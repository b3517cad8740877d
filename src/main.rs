use std::sync::Arc;

use anyhow::Context;
use rust_decimal::Decimal;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use wealth_onboard::api::{BackendApi, HttpBackend};
use wealth_onboard::config::AppConfig;
use wealth_onboard::onboarding::{
    CompletionFeedback, DemographicsForm, FinancialSnapshotForm, GoalsForm, IncomeEstimator,
    InvestmentPreferencesForm, LifeStage, LifeStageForm, ProfileAccumulator, StepForm,
    SubmissionCoordinator, Wizard, WizardStep,
};
use wealth_onboard::session::SessionStore;
use wealth_onboard::ui::{ConsoleNavigator, ConsoleNotifier, Navigator, Route};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;
    let session = match std::env::var("WEALTH_ONBOARD_TOKEN") {
        Ok(token) if !token.is_empty() => SessionStore::with_token(token),
        _ => SessionStore::new(),
    };
    let estimate_enabled = std::env::var("WEALTH_ONBOARD_ESTIMATE")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    eprintln!("💰 Wealth Onboard v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: {}", config.api_url);
    eprintln!(
        "   Income estimation: {}",
        if estimate_enabled { "enabled" } else { "disabled" }
    );
    eprintln!("   Commands: 'skip' (where offered), 'back', empty line keeps the default.\n");

    let api: Arc<dyn BackendApi> = Arc::new(HttpBackend::new(config.clone()));
    let accumulator = ProfileAccumulator::new();
    let mut wizard = Wizard::new(accumulator.clone());

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while !wizard.is_complete() {
        let step = wizard.current_step();
        eprintln!("── Step: {step} ──");
        match step {
            WizardStep::Demographics => {
                run_demographics(&mut wizard, &mut lines).await?;
            }
            WizardStep::LifeStage => {
                run_life_stage(&mut wizard, &mut lines).await?;
            }
            WizardStep::FinancialSnapshot => {
                run_financial_snapshot(&mut wizard, &mut lines).await?;
            }
            WizardStep::InvestmentPreferences => {
                run_investment_preferences(&mut wizard, &mut lines).await?;
            }
            WizardStep::Goals => {
                run_goals(&mut wizard, &mut lines).await?;
            }
            WizardStep::Complete => unreachable!("loop exits at terminal step"),
        }
    }

    let navigator = Arc::new(ConsoleNavigator);
    let mut coordinator = SubmissionCoordinator::new(
        Arc::clone(&api),
        session,
        accumulator,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
        Arc::new(ConsoleNotifier),
    );
    if estimate_enabled {
        coordinator =
            coordinator.with_estimator(IncomeEstimator::new(api, config.estimation_city));
    }

    match coordinator.submit().await {
        Ok(receipt) => {
            let feedback = CompletionFeedback::new(move || navigator.push(Route::Profile));
            eprintln!("🎉 Submitted at {}", receipt.submitted_at);
            feedback.acknowledge();
            Ok(())
        }
        Err(e) => Err(e).context("onboarding submission failed"),
    }
}

/// Read one trimmed line; empty input becomes None.
async fn prompt(lines: &mut Lines<BufReader<Stdin>>, label: &str) -> anyhow::Result<Option<String>> {
    eprint!("{label}: ");
    let line = lines.next_line().await.context("failed to read stdin")?;
    Ok(line
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty()))
}

async fn prompt_amount(
    lines: &mut Lines<BufReader<Stdin>>,
    label: &str,
) -> anyhow::Result<Option<Decimal>> {
    loop {
        match prompt(lines, label).await? {
            None => return Ok(None),
            Some(raw) => match raw.parse::<Decimal>() {
                Ok(amount) => return Ok(Some(amount)),
                Err(_) => eprintln!("   Not a number, try again."),
            },
        }
    }
}

/// Handle the shared navigation commands. Returns true if the command was
/// consumed and the caller should re-enter the step loop.
fn handle_nav(wizard: &mut Wizard, input: &str) -> bool {
    match input {
        "back" => {
            if !wizard.back() {
                eprintln!("   Already at the first step.");
            }
            true
        }
        "skip" => match wizard.skip() {
            Ok(_) => true,
            Err(e) => {
                eprintln!("   {e}");
                true
            }
        },
        _ => false,
    }
}

async fn run_demographics(
    wizard: &mut Wizard,
    lines: &mut Lines<BufReader<Stdin>>,
) -> anyhow::Result<()> {
    let mut form: DemographicsForm = wizard.prefill().await;
    if let Some(input) = prompt(lines, "Age cohort (e.g. 95s)").await? {
        if handle_nav(wizard, &input) {
            return Ok(());
        }
        form.age_group = Some(input);
    }
    if let Some(input) = prompt(lines, "Gender").await? {
        if handle_nav(wizard, &input) {
            return Ok(());
        }
        form.gender = Some(input);
    }
    commit(wizard, &form).await
}

async fn run_life_stage(
    wizard: &mut Wizard,
    lines: &mut Lines<BufReader<Stdin>>,
) -> anyhow::Result<()> {
    let mut form: LifeStageForm = wizard.prefill().await;
    let options = LifeStage::ALL
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    eprintln!("   Options: {options}");
    if let Some(input) = prompt(lines, "Life stage").await? {
        if handle_nav(wizard, &input) {
            return Ok(());
        }
        match input.parse::<LifeStage>() {
            Ok(stage) => form.life_stage = Some(stage),
            Err(()) => {
                eprintln!("   Unrecognized life stage, keeping current selection.");
            }
        }
    }
    commit(wizard, &form).await
}

async fn run_financial_snapshot(
    wizard: &mut Wizard,
    lines: &mut Lines<BufReader<Stdin>>,
) -> anyhow::Result<()> {
    let mut form: FinancialSnapshotForm = wizard.prefill().await;
    if let Some(amount) = prompt_amount(lines, "Monthly expenses").await? {
        form.monthly_expenses = Some(amount);
    }
    if let Some(amount) = prompt_amount(lines, "Savings").await? {
        form.savings = Some(amount);
    }
    if let Some(amount) = prompt_amount(lines, "Debt amount").await? {
        form.debt_amount = Some(amount);
    }
    if let Some(input) = prompt(lines, "Debt types (comma separated)").await? {
        if handle_nav(wizard, &input) {
            return Ok(());
        }
        form.debt_type = input
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if let Some(input) = prompt(lines, "Financial status (frugal/getting_by/surplus/quality/premium)").await? {
        if let Ok(status) = input.parse() {
            form.financial_status = Some(status);
        }
    }
    if let Some(amount) = prompt_amount(lines, "Cash on hand").await? {
        form.assets.cash = Some(amount);
    }
    commit(wizard, &form).await
}

async fn run_investment_preferences(
    wizard: &mut Wizard,
    lines: &mut Lines<BufReader<Stdin>>,
) -> anyhow::Result<()> {
    let mut form: InvestmentPreferencesForm = wizard.prefill().await;
    if let Some(input) =
        prompt(lines, "Risk tolerance (conservative/moderate/aggressive)").await?
    {
        if handle_nav(wizard, &input) {
            return Ok(());
        }
        if let Ok(risk) = input.parse() {
            form.risk_tolerance = Some(risk);
        }
    }
    if let Some(input) = prompt(lines, "Experience (beginner/intermediate/advanced)").await? {
        if let Ok(experience) = input.parse() {
            form.investment_experience = Some(experience);
        }
    }
    if let Some(input) = prompt(lines, "Horizon (short/medium/long)").await? {
        if let Ok(horizon) = input.parse() {
            form.investment_horizon = Some(horizon);
        }
    }
    commit(wizard, &form).await
}

async fn run_goals(
    wizard: &mut Wizard,
    lines: &mut Lines<BufReader<Stdin>>,
) -> anyhow::Result<()> {
    let mut form: GoalsForm = wizard.prefill().await;
    if let Some(input) = prompt(lines, "Short-term goal").await? {
        if handle_nav(wizard, &input) {
            return Ok(());
        }
        form.short_term_goal = Some(input);
    }
    if let Some(input) = prompt(lines, "Mid-term goal").await? {
        form.mid_term_goal = Some(input);
    }
    if let Some(input) = prompt(lines, "Long-term goal").await? {
        form.long_term_goal = Some(input);
    }
    if let Some(amount) = prompt_amount(lines, "Monthly investment amount").await? {
        form.monthly_investment_amount = Some(amount);
    }
    if let Some(rate) = prompt_amount(lines, "Expected return rate (e.g. 0.05)").await? {
        form.expected_return_rate = Some(rate);
    }
    commit(wizard, &form).await
}

/// Commit a form if it is complete; otherwise report what's missing and
/// stay on the step.
async fn commit<F: StepForm>(wizard: &mut Wizard, form: &F) -> anyhow::Result<()> {
    if !form.is_complete() {
        eprintln!("   Required fields are still missing; staying on this step.");
        return Ok(());
    }
    match wizard.next(form).await {
        Ok(next) => eprintln!("   ✓ saved, moving to {next}\n"),
        Err(e) => eprintln!("   {e}"),
    }
    Ok(())
}
