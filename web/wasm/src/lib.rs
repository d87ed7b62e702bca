use bacrs::i18n;
use bacrs::{
    Advisor, Currency, EndReason, Language, PersistError, RiskBand, RiskLevel, RoundReport, SessionOptions,
    SessionState, Settings, SettingsStore, Suggestion,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmAdvisor {
    advisor: Advisor,
}

#[wasm_bindgen]
impl WasmAdvisor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            advisor: Advisor::default(),
        }
    }

    pub fn configure(
        &self,
        language: &str,
        currency: &str,
        initial_bankroll: f64,
        initial_bet_amount: f64,
        loss_limit_percentage: f64,
        required_verifications: u32,
    ) -> Result<Option<String>, JsValue> {
        let language =
            Language::from_code(language).ok_or_else(|| JsValue::from_str("unknown language"))?;
        let currency =
            Currency::from_code(currency).ok_or_else(|| JsValue::from_str("unknown currency"))?;
        let options = SessionOptions::default()
            .with_language(language)
            .with_currency(currency)
            .with_initial_bankroll(initial_bankroll as i64)
            .with_initial_bet_amount(initial_bet_amount as i64)
            .with_loss_limit_percentage(loss_limit_percentage)
            .with_required_verifications(required_verifications);

        self.advisor
            .configure(options)
            .map(|warning| warning.map(|warning| format!("{warning:?}")))
            .map_err(js_err)
    }

    /// Switches currency and restarts the bankroll at its default.
    pub fn switch_currency(&self, code: &str) -> Result<Option<String>, JsValue> {
        let currency =
            Currency::from_code(code).ok_or_else(|| JsValue::from_str("unknown currency"))?;
        self.advisor
            .switch_currency(currency)
            .map(|warning| warning.map(|warning| format!("{warning:?}")))
            .map_err(js_err)
    }

    pub fn submit_round(&self, player_score: u8, banker_score: u8) -> Result<JsValue, JsValue> {
        let report = self
            .advisor
            .submit_round(player_score, banker_score)
            .map_err(js_err)?;
        to_js_value(&JsRoundReport::from(&report))
    }

    pub fn pause(&self) -> Result<(), JsValue> {
        self.advisor.pause().map_err(js_err)
    }

    pub fn resume(&self) -> Result<(), JsValue> {
        self.advisor.resume().map_err(js_err)
    }

    pub fn end_session(&self) -> bool {
        self.advisor.end_session(EndReason::Manual)
    }

    pub fn reset(&self) {
        self.advisor.reset();
    }

    /// Called from a JS interval in place of the threaded monitor.
    pub fn auto_risk_control(&self) -> bool {
        self.advisor.auto_risk_control()
    }

    pub fn martingale_exposure(&self, max_losses: u32) -> Result<JsValue, JsValue> {
        to_js_value(&self.advisor.martingale_exposure(max_losses))
    }

    /// Returns the persisted settings as a plain object.
    pub fn save_settings(&self) -> Result<JsValue, JsValue> {
        let mut storage = JsSettings::default();
        self.advisor.save_settings(&mut storage).map_err(js_err)?;
        to_js_value(&storage.settings)
    }

    /// Applies settings previously returned by [`save_settings`](Self::save_settings).
    pub fn load_settings(&self, value: JsValue) -> Result<bool, JsValue> {
        let storage = if value.is_null() || value.is_undefined() {
            JsSettings::default()
        } else {
            let settings = serde_wasm_bindgen::from_value::<Settings>(value)
                .map_err(|_| js_err(PersistError::Corrupt))?;
            JsSettings {
                settings: Some(settings),
            }
        };
        self.advisor.load_settings(&storage).map_err(js_err)
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let state = self.advisor.state();
        to_js_value(&Snapshot::new(&state))
    }
}

impl Default for WasmAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct JsSettings {
    settings: Option<Settings>,
}

impl SettingsStore for JsSettings {
    fn save(&mut self, settings: &Settings) -> Result<(), PersistError> {
        self.settings = Some(*settings);
        Ok(())
    }

    fn load(&self) -> Result<Option<Settings>, PersistError> {
        Ok(self.settings)
    }
}

#[derive(Serialize)]
struct Snapshot<'a> {
    state: &'a SessionState,
    suggestion: Suggestion,
    suggestion_text: String,
    risk_level: &'static str,
    risk_band: &'static str,
    risk_score: f64,
    warnings: Vec<&'static str>,
    bankroll_text: String,
}

impl<'a> Snapshot<'a> {
    fn new(state: &'a SessionState) -> Self {
        let language = state.options.language;
        let currency = state.options.currency;
        let suggestion = bacrs::staking::suggest(state);
        let risk = bacrs::risk::snapshot(state);
        let assessment = bacrs::risk::assess(state);

        Self {
            state,
            suggestion,
            suggestion_text: i18n::describe_suggestion(language, currency, &suggestion),
            risk_level: level_to_str(risk.risk_level),
            risk_band: band_to_str(assessment.band),
            risk_score: assessment.score,
            warnings: risk
                .warnings
                .into_iter()
                .map(|warning| i18n::warning_label(language, warning))
                .collect(),
            bankroll_text: i18n::format_amount(currency, state.bankroll),
        }
    }
}

#[derive(Serialize)]
struct JsRoundReport<'a> {
    report: &'a RoundReport,
    winner_text: &'static str,
    diff_text: &'static str,
    suggestion_text: String,
}

impl<'a> From<&'a RoundReport> for JsRoundReport<'a> {
    fn from(report: &'a RoundReport) -> Self {
        let language = report.state.options.language;
        let currency = report.state.options.currency;
        Self {
            report,
            winner_text: i18n::winner_label(language, report.round.winner),
            diff_text: i18n::diff_label(language, report.round.diff_type),
            suggestion_text: i18n::describe_suggestion(language, currency, &report.suggestion),
        }
    }
}

fn level_to_str(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Safe => "Safe",
        RiskLevel::Medium => "Medium",
        RiskLevel::High => "High",
    }
}

fn band_to_str(band: RiskBand) -> &'static str {
    match band {
        RiskBand::Low => "Low",
        RiskBand::Medium => "Medium",
        RiskBand::High => "High",
        RiskBand::Critical => "Critical",
    }
}

fn js_err<E: core::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}
