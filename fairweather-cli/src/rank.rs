//! Rank command implementation for the Fairweather CLI.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use fairweather_core::{DisabledReranker, RankRequest, RankResponse, RerankProvider, VenueScorer};
use fairweather_data::{HttpRerankProvider, HttpRerankProviderConfig};
use fairweather_rank::{EngineConfig, RecommendationEngine, RerankConfig};
use fairweather_scorer::{DistanceModel, ExtendedScorer, ExtendedScorerConfig, OperationalScorer};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{create_utf8_file, file_is_file, open_utf8_file};
use crate::{
    ARG_RANK_DISTANCE_MODEL, ARG_RANK_DIVERSITY, ARG_RANK_MAX_RESULTS, ARG_RANK_MODEL,
    ARG_RANK_OUTPUT, ARG_RANK_REQUEST, ARG_RERANK_API_KEY, ARG_RERANK_TIMEOUT_MS,
    ARG_RERANK_TOP_K, ARG_RERANK_URL, CliError, ENV_RANK_REQUEST,
};

/// Engine assembled for one CLI invocation.
pub(crate) type Engine = RecommendationEngine<Box<dyn VenueScorer>, Box<dyn RerankProvider>>;

/// Which scorer ranks the venues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ScoringModel {
    /// Weather, time, distance and popularity only.
    #[default]
    Operational,
    /// All nine dimensions with a confidence discount.
    Extended,
}

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank the candidate venues in a JSON-encoded RankRequest. \
                 Every option can also come from configuration files or \
                 FAIRWEATHER_* environment variables. When a reranking URL \
                 is configured the top of the ranking is offered to that \
                 service; any failure keeps the deterministic order.",
    about = "Rank venues for a request file"
)]
#[ortho_config(prefix = "FAIRWEATHER")]
pub(crate) struct RankArgs {
    /// Path to a JSON file containing a RankRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Write the response here instead of standard output.
    #[arg(long = ARG_RANK_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Scoring model.
    #[arg(long = ARG_RANK_MODEL, value_enum)]
    #[serde(default)]
    pub(crate) model: Option<ScoringModel>,
    /// Distance model: `banded` or `continuous`.
    #[arg(long = ARG_RANK_DISTANCE_MODEL, value_name = "model")]
    #[serde(default)]
    pub(crate) distance_model: Option<DistanceModel>,
    /// Spread the top of the results across venue types.
    #[arg(long = ARG_RANK_DIVERSITY, num_args = 0..=1, default_missing_value = "true")]
    #[serde(default)]
    pub(crate) diversity: Option<bool>,
    /// Upper bound on returned venues when the request sets none.
    #[arg(long = ARG_RANK_MAX_RESULTS, value_name = "n")]
    #[serde(default)]
    pub(crate) max_results: Option<usize>,
    /// Base URL of the reranking service (e.g. "http://localhost:8080").
    #[arg(long = ARG_RERANK_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) rerank_url: Option<String>,
    /// Bearer token for the reranking service.
    #[arg(long = ARG_RERANK_API_KEY, value_name = "token")]
    #[serde(default)]
    pub(crate) rerank_api_key: Option<String>,
    /// Milliseconds allowed for the reranking call.
    #[arg(long = ARG_RERANK_TIMEOUT_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) rerank_timeout_ms: Option<u64>,
    /// Number of top venues offered to the reranker.
    #[arg(long = ARG_RERANK_TOP_K, value_name = "n")]
    #[serde(default)]
    pub(crate) rerank_top_k: Option<usize>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct RankConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Optional output file.
    pub(crate) output: Option<Utf8PathBuf>,
    pub(crate) model: ScoringModel,
    pub(crate) distance_model: DistanceModel,
    pub(crate) engine: EngineConfig,
    /// Reranking service, when one is configured.
    pub(crate) rerank_url: Option<String>,
    pub(crate) rerank_api_key: Option<String>,
}

impl RankConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let path = &self.request_path;
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field: ARG_RANK_REQUEST,
                path: path.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field: ARG_RANK_REQUEST,
                    path: path.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_RANK_REQUEST,
                path: path.clone(),
                source,
            }),
        }
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_RANK_REQUEST,
            env: ENV_RANK_REQUEST,
        })?;

        let mut rerank = RerankConfig::default();
        if let Some(top_k) = args.rerank_top_k {
            rerank = rerank.with_top_k(top_k);
        }
        if let Some(millis) = args.rerank_timeout_ms {
            rerank = rerank.with_timeout(Duration::from_millis(millis));
        }
        let mut engine = EngineConfig::default()
            .with_diversity(args.diversity.unwrap_or(false))
            .with_rerank(rerank);
        if let Some(max_results) = args.max_results {
            engine = engine.with_max_results(max_results);
        }

        let rerank_url = args
            .rerank_url
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty());

        Ok(Self {
            request_path,
            output: args.output,
            model: args.model.unwrap_or_default(),
            distance_model: args.distance_model.unwrap_or_default(),
            engine,
            rerank_url,
            rerank_api_key: args.rerank_api_key,
        })
    }
}

/// Builds the engine for the current rank invocation.
pub(crate) trait EngineBuilder {
    fn build(&self, config: &RankConfig) -> Result<Engine, CliError>;
}

pub(crate) struct DefaultEngineBuilder;

impl EngineBuilder for DefaultEngineBuilder {
    fn build(&self, config: &RankConfig) -> Result<Engine, CliError> {
        Ok(RecommendationEngine::with_config(
            build_scorer(config),
            build_reranker(config)?,
            config.engine,
        ))
    }
}

pub(crate) fn build_scorer(config: &RankConfig) -> Box<dyn VenueScorer> {
    match config.model {
        ScoringModel::Operational => {
            Box::new(OperationalScorer::default().with_distance_model(config.distance_model))
        }
        ScoringModel::Extended => Box::new(ExtendedScorer::new(
            ExtendedScorerConfig::default().with_distance_model(config.distance_model),
        )),
    }
}

fn build_reranker(config: &RankConfig) -> Result<Box<dyn RerankProvider>, CliError> {
    let Some(base_url) = &config.rerank_url else {
        return Ok(Box::new(DisabledReranker));
    };
    let mut provider_config = HttpRerankProviderConfig::new(base_url.clone());
    if let Some(key) = &config.rerank_api_key {
        provider_config = provider_config.with_api_key(key.clone());
    }
    let provider = HttpRerankProvider::with_config(provider_config).map_err(|source| {
        CliError::BuildRerankProvider {
            base_url: base_url.clone(),
            source,
        }
    })?;
    Ok(Box::new(provider))
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rank_with(args, &DefaultEngineBuilder, &mut stdout)
}

pub(crate) fn run_rank_with(
    args: RankArgs,
    builder: &dyn EngineBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let response = execute_rank(&config, builder)?;
    match &config.output {
        Some(path) => {
            let mut file = create_utf8_file(path).map_err(CliError::WriteRankOutput)?;
            write_rank_response(&mut file, &response)
        }
        None => write_rank_response(writer, &response),
    }
}

fn execute_rank(config: &RankConfig, builder: &dyn EngineBuilder) -> Result<RankResponse, CliError> {
    let request = load_rank_request(&config.request_path)?;
    let engine = builder.build(config)?;
    let response = engine
        .recommend(&request)
        .map_err(|source| CliError::Rank {
            path: config.request_path.clone(),
            source,
        })?;
    info!(
        "ranked {} of {} candidate venues (reranked: {})",
        response.metadata.returned,
        response.metadata.total_processed,
        response.metadata.ai_reranking_applied
    );
    Ok(response)
}

/// Loads a JSON-encoded [`RankRequest`] from disk.
pub(crate) fn load_rank_request(path: &Utf8Path) -> Result<RankRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRankRequest {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseRankRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_rank_response(writer: &mut dyn Write, response: &RankResponse) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(response).map_err(CliError::SerialiseRankResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteRankOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteRankOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
