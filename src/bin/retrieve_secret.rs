//! Secrets Manager retrieval tool for the injection layer.
//!
//! The layer's wrapper script runs this binary during function init, captures
//! stdout, and exports each `KEY|VALUE` line as an environment variable before
//! handing control to the real runtime. Stdout therefore carries only the
//! pairs; diagnostics go to stderr.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::process::ExitCode;
use std::time::Duration;

use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_secretsmanager::error::SdkError;
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError;
use aws_sdk_sts::operation::assume_role::AssumeRoleError;
use clap::Parser;
use serde_json::Value;
use thiserror::Error;

/// Defaults applied when the wrapper script supplies no override.
const DEFAULT_REGION: &str = "us-east-2";
const DEFAULT_TIMEOUT_MS: u64 = 5000;
const DEFAULT_SESSION: &str = "param_session";

/// Fetch a JSON secret from AWS Secrets Manager and print its entries as
/// KEY|VALUE lines for the layer wrapper script to export.
#[derive(Debug, Parser)]
#[command(name = "retrieve-secret")]
struct Args {
    /// The Amazon region to use
    #[arg(short = 'r', long = "region", default_value = DEFAULT_REGION)]
    region: String,

    /// The ARN of the secret to read
    #[arg(short = 's', long = "secret-arn")]
    secret_arn: String,

    /// Optional role to assume for secret access
    #[arg(short = 'a', long = "role-arn")]
    role_arn: Option<String>,

    /// Time budget for all AWS calls, in milliseconds
    #[arg(short = 't', long = "timeout", default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// STS session name used when assuming the role
    #[arg(short = 'n', long = "session-name", default_value = DEFAULT_SESSION)]
    session_name: String,
}

impl Args {
    /// Clap enforces presence; empty strings can still slip through the
    /// wrapper script, so reject them before any network call.
    fn validate(&self) -> Result<(), RetrieveError> {
        if self.region.is_empty() || self.secret_arn.is_empty() {
            return Err(RetrieveError::MissingArguments);
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
enum RetrieveError {
    #[error("a non-empty region and secret ARN are required")]
    MissingArguments,

    #[error("failed to assume role {role_arn}")]
    AssumeRole {
        role_arn: String,
        #[source]
        source: SdkError<AssumeRoleError>,
    },

    #[error("assumed role returned no credentials")]
    NoCredentials,

    #[error("failed to retrieve secret")]
    GetSecret(#[source] SdkError<GetSecretValueError>),

    #[error("secret has no string payload")]
    EmptySecret,

    #[error("secret payload is not a JSON object")]
    ParseSecret(#[from] serde_json::Error),

    #[error("retrieval did not finish within {0} ms")]
    TimedOut(u64),
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args).await {
        Ok(pairs) => {
            for pair in pairs {
                println!("{pair}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("[ERROR] {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("[ERROR]   caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

/// Run the whole retrieval under the configured time budget.
async fn run(args: &Args) -> Result<Vec<String>, RetrieveError> {
    args.validate()?;

    let budget = Duration::from_millis(args.timeout_ms);
    match tokio::time::timeout(budget, retrieve_pairs(args)).await {
        Ok(result) => result,
        Err(_) => Err(RetrieveError::TimedOut(args.timeout_ms)),
    }
}

async fn retrieve_pairs(args: &Args) -> Result<Vec<String>, RetrieveError> {
    let config = load_aws_config(&args.region).await;
    let client = secrets_client(&config, args).await?;
    let payload = fetch_secret_string(&client, &args.secret_arn).await?;
    parse_pairs(&payload)
}

/// Load the AWS config for the requested region with retries disabled:
/// every API call gets exactly one attempt inside the overall time budget.
async fn load_aws_config(region: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_owned()))
        .retry_config(RetryConfig::disabled())
        .load()
        .await
}

/// Build the Secrets Manager client, assuming the requested role first when
/// one was supplied; otherwise the ambient credentials are used directly.
async fn secrets_client(
    config: &SdkConfig,
    args: &Args,
) -> Result<aws_sdk_secretsmanager::Client, RetrieveError> {
    let Some(role_arn) = &args.role_arn else {
        return Ok(aws_sdk_secretsmanager::Client::new(config));
    };

    let sts = aws_sdk_sts::Client::new(config);
    let assumed = sts
        .assume_role()
        .role_arn(role_arn)
        .role_session_name(&args.session_name)
        .send()
        .await
        .map_err(|err| RetrieveError::AssumeRole {
            role_arn: role_arn.clone(),
            source: err,
        })?;

    let creds = assumed.credentials().ok_or(RetrieveError::NoCredentials)?;
    let provider = aws_sdk_secretsmanager::config::Credentials::new(
        creds.access_key_id(),
        creds.secret_access_key(),
        Some(creds.session_token().to_owned()),
        None,
        "assumed-role",
    );

    let sm_config = aws_sdk_secretsmanager::config::Builder::from(config)
        .credentials_provider(provider)
        .build();
    Ok(aws_sdk_secretsmanager::Client::from_conf(sm_config))
}

async fn fetch_secret_string(
    client: &aws_sdk_secretsmanager::Client,
    secret_arn: &str,
) -> Result<String, RetrieveError> {
    let output = client
        .get_secret_value()
        .secret_id(secret_arn)
        .send()
        .await
        .map_err(RetrieveError::GetSecret)?;

    output
        .secret_string()
        .map(str::to_owned)
        .ok_or(RetrieveError::EmptySecret)
}

/// Turn the secret's JSON object into `KEY|VALUE` lines, sorted by key so
/// the output is stable run to run.
fn parse_pairs(payload: &str) -> Result<Vec<String>, RetrieveError> {
    let entries: BTreeMap<String, Value> = serde_json::from_str(payload)?;
    Ok(entries
        .iter()
        .map(|(key, value)| format!("{key}|{}", render_value(value)))
        .collect())
}

/// String values are exported verbatim; anything else keeps its JSON form.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
