use super::client::Client;
use super::envelope::Call;
use super::types::{
    CardCodeData, EnvironmentVariablesData, EnvironmentVariablesRequest, ExecutionsData,
    PublishCodeRequest, SaveCodeRequest,
};
use crate::error::Result;
use crate::models::{
    CardCode, CardDetails, CardExecution, EnvironmentVariables, SimulateExecutionInput,
};
use serde_json::{Map, Value};
use tracing::instrument;

/// A card bound to the client it came from. Programmable cards expose their code,
/// environment variables and execution history.
#[derive(Debug, Clone)]
pub struct Card {
    client: Client,
    details: CardDetails,
}

impl Card {
    pub(crate) fn new(client: Client, details: CardDetails) -> Self {
        Self { client, details }
    }

    pub fn key(&self) -> &str {
        &self.details.card_key
    }

    pub fn details(&self) -> &CardDetails {
        &self.details
    }

    fn call(&self, operation: &'static str) -> Call {
        Call::new(operation).with("card_key", self.key())
    }

    fn path(&self, rest: &str) -> String {
        format!("/za/v1/cards/{}{}", self.key(), rest)
    }

    #[instrument(name = "Fetching saved code", skip_all, fields(card_key = %self.key()))]
    pub async fn saved_code(&self) -> Result<CardCode> {
        let call = self.call("get saved code");
        let data: CardCodeData = self.client.get(&call, &self.path("/code"), &[]).await?;
        Ok(data.result)
    }

    #[instrument(name = "Fetching published code", skip_all, fields(card_key = %self.key()))]
    pub async fn published_code(&self) -> Result<CardCode> {
        let call = self.call("get published code");
        let data: CardCodeData = self
            .client
            .get(&call, &self.path("/publishedcode"), &[])
            .await?;
        Ok(data.result)
    }

    #[instrument(name = "Saving code", skip_all, fields(card_key = %self.key()))]
    pub async fn update_saved_code(&self, code: &str) -> Result<CardCode> {
        let call = self.call("update saved code");
        let body = SaveCodeRequest { code };
        let data: CardCodeData = self.client.post(&call, &self.path("/code"), &body).await?;
        Ok(data.result)
    }

    #[instrument(name = "Publishing code", skip_all, fields(card_key = %self.key(), code_id = %code_id))]
    pub async fn publish_saved_code(&self, code_id: &str) -> Result<CardCode> {
        let call = self.call("publish saved code").with("code_id", code_id);
        let body = PublishCodeRequest {
            codeid: code_id,
            code: "",
        };
        let data: CardCodeData = self.client.post(&call, &self.path("/code"), &body).await?;
        Ok(data.result)
    }

    /// Dry-run code against a synthetic transaction. Sandbox only.
    #[instrument(name = "Simulating execution", skip_all, fields(card_key = %self.key()))]
    pub async fn simulate_execution(
        &self,
        input: &SimulateExecutionInput,
    ) -> Result<Vec<CardExecution>> {
        let call = self.call("simulate function execution");
        let data: ExecutionsData = self
            .client
            .post(&call, &self.path("/code/execute"), input)
            .await?;
        Ok(data.result)
    }

    #[instrument(name = "Fetching executions", skip_all, fields(card_key = %self.key()))]
    pub async fn executions(&self) -> Result<Vec<CardExecution>> {
        let call = self.call("get executions");
        let data: ExecutionsData = self
            .client
            .get(&call, &self.path("/code/executions"), &[])
            .await?;
        Ok(data.result)
    }

    #[instrument(name = "Fetching environment variables", skip_all, fields(card_key = %self.key()))]
    pub async fn environment_variables(&self) -> Result<EnvironmentVariables> {
        let call = self.call("get environment variables");
        let data: EnvironmentVariablesData = self
            .client
            .get(&call, &self.path("/environmentvariables"), &[])
            .await?;
        Ok(data.result)
    }

    #[instrument(name = "Updating environment variables", skip_all, fields(card_key = %self.key()))]
    pub async fn update_environment_variables(
        &self,
        variables: &Map<String, Value>,
    ) -> Result<EnvironmentVariables> {
        let call = self.call("update environment variables");
        let body = EnvironmentVariablesRequest { variables };
        let data: EnvironmentVariablesData = self
            .client
            .post(&call, &self.path("/environmentvariables"), &body)
            .await?;
        Ok(data.result)
    }
}
