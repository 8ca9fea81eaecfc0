use std::error::Error;
use std::sync::Arc;

use shadesync_engine::{Clock, SystemClock};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::{io, signal};

use crate::settings::Settings;
use crate::worker::ControllerWorker;

pub mod settings;
pub mod worker;

pub async fn run(settings: &Arc<Settings>) -> Result<(), Box<dyn Error>> {
    let worker = ControllerWorker::new(settings, SystemClock)?;

    let stdin = BufReader::new(io::stdin());
    let stdout = io::stdout();

    tokio::select! {
        result = serve(worker, stdin, stdout) => result?,
        _ = signal::ctrl_c() => tracing::info!("Interrupted, shutting down"),
    }

    Ok(())
}

/// Feed lines from `reader` through the worker until input ends, writing one
/// line per output message.
pub async fn serve<C, R, W>(mut worker: ControllerWorker<C>, reader: R, mut writer: W) -> io::Result<()>
where
    C: Clock,
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin,
{
    let (line_tx, mut line_rx) = mpsc::channel::<String>(32);

    let reader_task = tokio::spawn(async move {
        let mut lines = reader.lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if line_tx.send(line).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("Failed to read input: {e}");
                    break;
                }
            }
        }
    });

    while let Some(line) = line_rx.recv().await {
        for output in worker.process_line(&line) {
            writer.write_all(output.as_bytes()).await?;
            writer.write_all(b"\n").await?;
        }
        writer.flush().await?;
    }

    if let Err(e) = reader_task.await {
        tracing::error!("Input reader stopped: {e}");
    }
    tracing::info!("Input closed, shutting down");

    Ok(())
}
