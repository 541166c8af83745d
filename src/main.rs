use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use swap_transfer_indexer::{
    adapters::{
        parsers::SplTransferParser,
        sinks::{JsonLinesSink, PostgresRepository},
        FileSourceAdaptor, SolanaRpcGateway,
    },
    application::{BlockGateway, BlockPoller, IngestionPipeline, RecordSink, TransactionParser},
    infrastructure::{logging, IndexerConfig, SinkType, SourceType},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    logging::init();

    let config = IndexerConfig::from_env()?;

    tracing::info!("Initializing SPL swap transfer indexer");

    // Dependency Injection - Source
    let gateway: Arc<dyn BlockGateway> = match &config.source {
        SourceType::Rpc => Arc::new(SolanaRpcGateway::new(
            config.rpc_url.clone(),
            config.rpc_timeout,
            config.commitment,
        )),
        SourceType::File(path) => Arc::new(FileSourceAdaptor::from_path(path).await?),
    };

    // Dependency Injection - Parsers
    let parsers: Vec<Arc<dyn TransactionParser>> =
        vec![Arc::new(SplTransferParser::new(config.mints.clone()))];

    // Dependency Injection - Sink
    let sink: Arc<dyn RecordSink> = match &config.sink {
        SinkType::Stdout => Arc::new(JsonLinesSink::stdout()),
        SinkType::File(path) => Arc::new(JsonLinesSink::append_to(path).await?),
        SinkType::Postgres(url) => {
            let repository = PostgresRepository::new(url).await?;
            repository.ensure_schema().await?;
            Arc::new(repository)
        }
    };

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown requested, finishing current block");
            trigger.cancel();
        }
    });

    tracing::info!(sink = sink.name(), scan_policy = ?config.scan_policy, "Starting Ingestion Pipeline...");

    // Ingestion Pipeline
    let poller = BlockPoller::new(gateway, config.retry.clone());
    let pipeline = IngestionPipeline::new(poller, parsers, sink).with_scan_policy(config.scan_policy);

    pipeline.run(shutdown).await?;

    Ok(())
}
