//! Oracle module queries.

use std::sync::Arc;

use serde::Deserialize;
use terra_core::{
    AccAddress, AggregateExchangeRatePrevote, AggregateExchangeRateVote, Coin, Coins, Denom,
    ExchangeRatePrevote, ExchangeRateVote, OracleParams, ValAddress, serializers,
};

use super::get_result;
use crate::error::LcdError;
use crate::requester::ApiRequester;

#[derive(Deserialize)]
struct MissCount(#[serde(with = "serializers::from_str")] u64);

/// Queries against the oracle module. Stateless: every method is a single
/// round trip through the shared requester.
#[derive(Clone)]
pub struct OracleApi {
    requester: Arc<dyn ApiRequester>,
}

impl OracleApi {
    pub fn new(requester: Arc<dyn ApiRequester>) -> Self {
        Self { requester }
    }

    /// Currently cast exchange rate votes, filtered by denomination and/or validator.
    ///
    /// At least one filter must be given. This is not checked here; the node
    /// rejects the request and its error is returned as-is.
    pub async fn votes(
        &self,
        denom: Option<&str>,
        validator: Option<&ValAddress>,
    ) -> Result<Vec<ExchangeRateVote>, LcdError> {
        let query = filter_query(denom, validator);
        let votes: Option<Vec<ExchangeRateVote>> =
            get_result(self.requester.as_ref(), "/oracle/votes", &query).await?;
        Ok(votes.unwrap_or_default())
    }

    /// Currently cast prevotes, filtered by denomination and/or validator.
    ///
    /// Same filter rule as [`OracleApi::votes`].
    pub async fn prevotes(
        &self,
        denom: Option<&str>,
        validator: Option<&ValAddress>,
    ) -> Result<Vec<ExchangeRatePrevote>, LcdError> {
        let query = filter_query(denom, validator);
        let prevotes: Option<Vec<ExchangeRatePrevote>> =
            get_result(self.requester.as_ref(), "/oracle/prevotes", &query).await?;
        Ok(prevotes.unwrap_or_default())
    }

    /// Registered exchange rates of LUNA in every available denomination.
    pub async fn exchange_rates(&self) -> Result<Coins, LcdError> {
        let rates: Option<Coins> =
            get_result(self.requester.as_ref(), "/oracle/denoms/exchange_rates", &[]).await?;
        Ok(rates.unwrap_or_default())
    }

    /// Registered exchange rate of LUNA in `denom`, or `None` if the node has none.
    pub async fn exchange_rate(&self, denom: &str) -> Result<Option<Coin>, LcdError> {
        let rates = self.exchange_rates().await?;
        Ok(rates.get(denom).cloned())
    }

    /// Denominations currently active in the oracle.
    pub async fn active_denoms(&self) -> Result<Vec<Denom>, LcdError> {
        let denoms: Option<Vec<Denom>> =
            get_result(self.requester.as_ref(), "/oracle/denoms/actives", &[]).await?;
        Ok(denoms.unwrap_or_default())
    }

    /// Account permitted to sign oracle votes in the validator's name.
    pub async fn feeder_address(&self, validator: &ValAddress) -> Result<AccAddress, LcdError> {
        let path = format!("/oracle/voters/{validator}/feeder");
        get_result(self.requester.as_ref(), &path, &[]).await
    }

    /// Number of missed votes of the validator in the current slash window.
    pub async fn misses(&self, validator: &ValAddress) -> Result<u64, LcdError> {
        let path = format!("/oracle/voters/{validator}/miss");
        let MissCount(count) = get_result(self.requester.as_ref(), &path, &[]).await?;
        Ok(count)
    }

    pub async fn aggregate_prevote(
        &self,
        validator: &ValAddress,
    ) -> Result<AggregateExchangeRatePrevote, LcdError> {
        let path = format!("/oracle/voters/{validator}/aggregate_prevote");
        get_result(self.requester.as_ref(), &path, &[]).await
    }

    pub async fn aggregate_vote(
        &self,
        validator: &ValAddress,
    ) -> Result<AggregateExchangeRateVote, LcdError> {
        let path = format!("/oracle/voters/{validator}/aggregate_vote");
        get_result(self.requester.as_ref(), &path, &[]).await
    }

    /// Current oracle module parameters.
    pub async fn parameters(&self) -> Result<OracleParams, LcdError> {
        get_result(self.requester.as_ref(), "/oracle/parameters", &[]).await
    }
}

fn filter_query<'a>(
    denom: Option<&'a str>,
    validator: Option<&'a ValAddress>,
) -> Vec<(&'static str, &'a str)> {
    let mut query = Vec::with_capacity(2);
    if let Some(denom) = denom {
        query.push(("denom", denom));
    }
    if let Some(validator) = validator {
        query.push(("validator", validator.as_str()));
    }
    query
}
