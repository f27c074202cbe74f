//! Application state for the estimator.
//!
//! [`AppState`] holds the form, the active prices and the estimate derived
//! from them. The estimate is never edited directly: every change goes
//! through [`AppState::update`] or [`AppState::set_prices`], which
//! recompute it from scratch.

use paint_core::calculations::{AreaBreakdown, EstimateError, area_breakdown, estimate};
use paint_core::{ConsultationRelay, FullEstimate, PricingTable};
use tracing::debug;

use crate::settings::FormSettings;

/// First message shown in every consultation transcript.
pub const GREETING: &str = "สวัสดีครับ ผมคือผู้ช่วย AI สำหรับงานสีโรงเรียน มีข้อสงสัยเรื่องการเลือกสี, ขั้นตอนการทำงาน หรืออยากให้ช่วยวิเคราะห์งบประมาณ สอบถามได้เลยครับ!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    form: FormSettings,
    prices: PricingTable,
    areas: AreaBreakdown,
    estimate: FullEstimate,
}

impl AppState {
    /// Builds the state and computes the first estimate.
    pub fn new(
        form: FormSettings,
        prices: PricingTable,
    ) -> Result<Self, EstimateError> {
        let (areas, estimate) = compute(&form, &prices)?;
        Ok(Self {
            form,
            prices,
            areas,
            estimate,
        })
    }

    pub fn form(&self) -> &FormSettings {
        &self.form
    }

    pub fn prices(&self) -> &PricingTable {
        &self.prices
    }

    pub fn estimate(&self) -> &FullEstimate {
        &self.estimate
    }

    /// Area summary for the current form.
    pub fn areas(&self) -> &AreaBreakdown {
        &self.areas
    }

    /// Applies `change` to the form and recomputes the estimate.
    ///
    /// If the changed form cannot be estimated the state is left as it was.
    pub fn update<F>(
        &mut self,
        change: F,
    ) -> Result<&FullEstimate, EstimateError>
    where
        F: FnOnce(&mut FormSettings),
    {
        let mut form = self.form.clone();
        change(&mut form);
        (self.areas, self.estimate) = compute(&form, &self.prices)?;
        self.form = form;
        debug!(grand_total = %self.estimate.grand_total, "form updated");
        Ok(&self.estimate)
    }

    /// Replaces the pricing table and recomputes the estimate.
    ///
    /// If the table is invalid the state is left as it was.
    pub fn set_prices(
        &mut self,
        prices: PricingTable,
    ) -> Result<&FullEstimate, EstimateError> {
        (self.areas, self.estimate) = compute(&self.form, &prices)?;
        self.prices = prices;
        Ok(&self.estimate)
    }

    /// Restores the factory prices.
    pub fn reset_prices(&mut self) -> Result<&FullEstimate, EstimateError> {
        self.set_prices(PricingTable::default())
    }
}

fn compute(
    form: &FormSettings,
    prices: &PricingTable,
) -> Result<(AreaBreakdown, FullEstimate), EstimateError> {
    let estimate = estimate(&form.to_input(), prices)?;
    let areas = area_breakdown(&form.dimensions, &form.openings, form.scope)?;
    Ok((areas, estimate))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

/// Consultation messages in display order.
///
/// Only one question may be in flight at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: Role::Ai,
                text: GREETING.to_string(),
            }],
            pending: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Records a user question and marks the transcript pending.
    ///
    /// Returns `false` without recording anything if the question is blank
    /// or an answer is still outstanding.
    pub fn begin(
        &mut self,
        question: &str,
    ) -> bool {
        if self.pending || question.trim().is_empty() {
            return false;
        }
        self.messages.push(ChatMessage {
            role: Role::User,
            text: question.to_string(),
        });
        self.pending = true;
        true
    }

    /// Records the answer to the outstanding question.
    pub fn finish(
        &mut self,
        reply: String,
    ) {
        self.messages.push(ChatMessage {
            role: Role::Ai,
            text: reply,
        });
        self.pending = false;
    }

    /// Sends one question through `relay` with the current estimate as
    /// context and records both sides. Returns the reply, or `None` if the
    /// question was not accepted.
    pub async fn ask(
        &mut self,
        relay: &ConsultationRelay,
        question: &str,
        estimate: Option<&FullEstimate>,
    ) -> Option<&str> {
        if !self.begin(question) {
            return None;
        }
        let reply = relay.ask(question, estimate).await;
        self.finish(reply);
        self.messages.last().map(|m| m.text.as_str())
    }
}
