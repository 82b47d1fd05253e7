use crate::domain::shared::category::ExpenseCategory;

const INSTRUCTION: &str = r#"You are a data extractor for a personal expense tracker.
Read the attached receipt or invoice image and extract a single expense.
Respond with ONLY one JSON object. Do not add any explanation, prose or markdown code fences.

Rules:
- "amount" is the FINAL TOTAL payable on the receipt, not a subtotal, tax line or individual item.
- Write "amount" as a plain number with no currency symbol and no thousands separators.
- If the date is missing or cannot be read, use null. Never invent or guess a date.
- If no category fits, use "Other"."#;

const SCHEMA_TEMPLATE: &str = r#"Output schema:
{
  "description": string, the merchant name or a short summary of the purchase,
  "amount": number, the final total paid,
  "date": "YYYY-MM-DD" or null,
  "category": one of {categories}
}

Example output:
{"description":"Supermarket","amount":12990,"date":"2024-03-18","category":"Food"}"#;

/// Fixed instruction sent with every receipt image.
///
/// Independent of the image; rebuilt per call from the templates above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionPrompt {
    instruction: String,
    schema: String,
}

impl ExtractionPrompt {
    pub fn for_receipt() -> Self {
        let categories = ExpenseCategory::ALL
            .iter()
            .map(|c| format!("\"{}\"", c.label()))
            .collect::<Vec<_>>()
            .join(" | ");

        Self {
            instruction: INSTRUCTION.to_string(),
            schema: SCHEMA_TEMPLATE.replace("{categories}", &categories),
        }
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Instruction and schema as one text block.
    pub fn text(&self) -> String {
        format!("{}\n\n{}", self.instruction, self.schema)
    }
}
