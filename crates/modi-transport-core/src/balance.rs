use crate::TransportError;

fn checked_total(values: &[i64], side: &str) -> Result<i64, TransportError> {
    values
        .iter()
        .try_fold(0_i64, |acc, &value| acc.checked_add(value))
        .ok_or_else(|| TransportError::InvalidInput(format!("total {side} overflows i64")))
}

/// Returns the shared total when supply and demand balance.
pub fn check_balance(supply: &[i64], demand: &[i64]) -> Result<i64, TransportError> {
    let total_supply = checked_total(supply, "supply")?;
    let total_demand = checked_total(demand, "demand")?;
    if total_supply != total_demand {
        return Err(TransportError::Unbalanced {
            supply: total_supply,
            demand: total_demand,
        });
    }
    Ok(total_supply)
}
