use tracing::{debug, warn};

use crate::FullEstimate;
use crate::calculations::common::format_thousands;
use crate::consult::service::CompletionService;

/// Model the relay is configured for.
pub const MODEL_ID: &str = "gemini-2.5-flash";

/// Persona given to the model on every call.
pub const SYSTEM_INSTRUCTION: &str = "\
คุณคือ \"ผู้เชี่ยวชาญงานสีอาคารโรงเรียน\" (School Paint Consultant)
หน้าที่ของคุณคือให้คำแนะนำทางเทคนิคเกี่ยวกับการทาสีโรงเรียน การเลือกสีที่เหมาะสมกับห้องเรียน (จิตวิทยาสี) การแก้ปัญหางานปูน และการประมาณการ

ข้อมูลราคากลางที่คุณใช้อ้างอิง:
- สีรองพื้นปูนเก่า: 2,500 บาท/ถัง
- สีรองพื้นปูนใหม่: 1,800 บาท/ถัง
- สีทับหน้าภายใน: 2,500 บาท/ถัง
- สีทับหน้าภายนอก: 3,500 บาท/ถัง

ตอบคำถามให้กระชับ เข้าใจง่าย และเน้นความเป็นมืออาชีพ";

/// Returned when the service answers with no text.
pub const EMPTY_RESPONSE_MESSAGE: &str = "ขออภัย ไม่สามารถประมวลผลคำตอบได้ในขณะนี้";

/// Returned when the call fails.
pub const SERVICE_ERROR_MESSAGE: &str =
    "เกิดข้อผิดพลาดในการเชื่อมต่อกับ AI Consultant กรุณาลองใหม่อีกครั้ง";

/// Short plain-text summary of the estimate sent along with a question.
///
/// Empty when there is no estimate.
pub fn build_context(estimate: Option<&FullEstimate>) -> String {
    let Some(estimate) = estimate else {
        return String::new();
    };

    let mut context = format!(
        "งบประมาณรวมปัจจุบัน: {} บาท. ",
        format_thousands(estimate.grand_total)
    );
    if let Some(interior) = &estimate.interior {
        context.push_str(&format!(
            "พื้นที่ภายใน: {} ตรม. ",
            interior.net_area.normalize()
        ));
    }
    if let Some(exterior) = &estimate.exterior {
        context.push_str(&format!(
            "พื้นที่ภายนอก: {} ตรม. ",
            exterior.net_area.normalize()
        ));
    }
    context
}

/// Prefixes the project context, if any, to the user's question.
pub fn build_prompt(
    question: &str,
    context: &str,
) -> String {
    if context.is_empty() {
        question.to_string()
    } else {
        format!("ข้อมูลโครงการปัจจุบัน:\n{context}\n\nคำถามของผู้ใช้: {question}")
    }
}

/// Forwards questions to a [`CompletionService`].
///
/// Each call is independent: no retry, no conversation memory. The caller
/// keeps the transcript.
pub struct ConsultationRelay {
    service: Box<dyn CompletionService>,
}

impl ConsultationRelay {
    pub fn new(service: Box<dyn CompletionService>) -> Self {
        Self { service }
    }

    /// Asks one question and returns the reply text.
    ///
    /// Never fails: a service error yields [`SERVICE_ERROR_MESSAGE`] and an
    /// empty reply yields [`EMPTY_RESPONSE_MESSAGE`].
    pub async fn ask(
        &self,
        question: &str,
        estimate: Option<&FullEstimate>,
    ) -> String {
        let context = build_context(estimate);
        let prompt = build_prompt(question, &context);
        debug!(prompt_len = prompt.len(), "sending consultation request");

        match self.service.complete(&prompt, SYSTEM_INSTRUCTION).await {
            Ok(text) if text.trim().is_empty() => {
                warn!("consultation service returned an empty response");
                EMPTY_RESPONSE_MESSAGE.to_string()
            }
            Ok(text) => text,
            Err(error) => {
                warn!(%error, "consultation request failed");
                SERVICE_ERROR_MESSAGE.to_string()
            }
        }
    }
}
