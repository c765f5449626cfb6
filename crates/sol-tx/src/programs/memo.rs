use super::MEMO_ID;
use crate::instruction::Instruction;

/// A memo instruction: the UTF-8 text as data and no accounts.
pub fn memo(text: &str) -> Instruction {
    Instruction::new(MEMO_ID, Vec::new(), text.as_bytes().to_vec())
}
