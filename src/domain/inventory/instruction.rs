//! Instruction value object for the recognition service

use super::stock::Inventory;
use crate::domain::control::PendingAction;

const RECOGNITION_INSTRUCTION: &str = "Name the food item shown in the picture in one or two words. \
Check the attached inventory list first: if a matching item is already listed, answer with exactly that name. \
Otherwise name the item as it appears in the picture. \
Answer with the name only, without punctuation or explanations. \
If you are not sure, answer 'unknown'.";

const ANNOUNCEMENT_STYLE: &str = "(Separate all words of your answer with single spaces only. \
Do not use tabs, line breaks, hyphens or lists.)";

/// Value object holding one instruction sent to the recognition service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    content: String,
}

impl Instruction {
    /// Instruction to identify the product in a frame
    pub fn recognition(inventory: &Inventory) -> Self {
        let listing = if inventory.is_empty() {
            "(empty)".to_string()
        } else {
            inventory.listing()
        };
        Self {
            content: format!("{}\n\nInventory:\n{}", RECOGNITION_INSTRUCTION, listing),
        }
    }

    /// Instruction to phrase the spoken confirmation for an action
    pub fn announcement(action: PendingAction, label: &str) -> Self {
        let sentence = match action {
            PendingAction::Remove => {
                "Say in one short sentence that the following product was taken out of the fridge: "
            }
            _ => "Say in one short sentence that the following product was put into the fridge: ",
        };
        Self {
            content: format!("{} {}{}", ANNOUNCEMENT_STYLE, sentence, label),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
