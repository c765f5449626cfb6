//! Compute Budget program: priority fees and compute-unit limits.

use super::COMPUTE_BUDGET_ID;
use crate::instruction::Instruction;

const SET_COMPUTE_UNIT_LIMIT: u8 = 2;
const SET_COMPUTE_UNIT_PRICE: u8 = 3;

/// The compute-budget instructions this crate reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeBudgetInstruction {
    SetComputeUnitLimit(u32),
    /// Price in micro-lamports per compute unit.
    SetComputeUnitPrice(u64),
}

impl ComputeBudgetInstruction {
    /// Decode instruction data. Returns `None` for other compute-budget
    /// instructions or malformed data.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let (&tag, rest) = data.split_first()?;
        match tag {
            SET_COMPUTE_UNIT_LIMIT => {
                let units = <[u8; 4]>::try_from(rest).ok()?;
                Some(Self::SetComputeUnitLimit(u32::from_le_bytes(units)))
            }
            SET_COMPUTE_UNIT_PRICE => {
                let price = <[u8; 8]>::try_from(rest).ok()?;
                Some(Self::SetComputeUnitPrice(u64::from_le_bytes(price)))
            }
            _ => None,
        }
    }

    pub fn data(&self) -> Vec<u8> {
        match self {
            Self::SetComputeUnitLimit(units) => {
                let mut data = vec![SET_COMPUTE_UNIT_LIMIT];
                data.extend_from_slice(&units.to_le_bytes());
                data
            }
            Self::SetComputeUnitPrice(price) => {
                let mut data = vec![SET_COMPUTE_UNIT_PRICE];
                data.extend_from_slice(&price.to_le_bytes());
                data
            }
        }
    }

    pub fn into_instruction(self) -> Instruction {
        Instruction::new(COMPUTE_BUDGET_ID, Vec::new(), self.data())
    }
}

pub fn set_compute_unit_limit(units: u32) -> Instruction {
    ComputeBudgetInstruction::SetComputeUnitLimit(units).into_instruction()
}

pub fn set_compute_unit_price(micro_lamports: u64) -> Instruction {
    ComputeBudgetInstruction::SetComputeUnitPrice(micro_lamports).into_instruction()
}
