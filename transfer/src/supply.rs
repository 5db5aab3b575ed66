//! Administrative mint and voluntary burn.

use x1_ledger::{BalanceLedger, LedgerBatch, LedgerEvent};
use x1_types::{Address, Amount};

use crate::error::TransferError;

/// Direct supply adjustments outside the transfer path.
///
/// Minting is an administrative operation; as with penalties the caller is
/// trusted to have authorised it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SupplyAuthority;

impl SupplyAuthority {
    /// Create `amount` new tokens in `to`'s account.
    pub fn mint(
        &self,
        ledger: &mut BalanceLedger,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TransferError> {
        if amount.is_zero() {
            return Err(TransferError::ZeroAmount);
        }
        ledger.mint(to, amount)?;
        tracing::debug!(%to, %amount, "minted");
        Ok(())
    }

    /// Burn `amount` of the holder's own free balance.
    pub fn burn(
        &self,
        ledger: &mut BalanceLedger,
        holder: &Address,
        amount: Amount,
    ) -> Result<(), TransferError> {
        if amount.is_zero() {
            return Err(TransferError::ZeroAmount);
        }
        let mut batch = LedgerBatch::new();
        batch
            .debit(holder, amount)
            .burn(amount)
            .emit(LedgerEvent::Burn {
                burner: holder.clone(),
                amount,
            });
        ledger.apply(batch)?;
        tracing::debug!(%holder, %amount, "burned");
        Ok(())
    }
}
