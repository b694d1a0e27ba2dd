use crate::composer::EmailComposer;
use crate::config::Settings;
use crate::dispatcher::dispatch;
use crate::mail::Mailer;
use crate::qr_code::QrCodeGenerator;
use crate::speaker_schedule::SpeakerSchedulesRetriever;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Confirmed speakers with a resolved schedule.
    pub speakers: usize,
    pub composed: usize,
    pub sent: usize,
}

/// One run: load, match, compose, then send.
///
/// Every email is composed before the first one is sent, so a loading,
/// matching or rendering error means nothing goes out.
pub struct Pipeline {
    retriever: SpeakerSchedulesRetriever,
    composer: EmailComposer,
    batch_limit: usize,
}

impl Pipeline {
    pub fn new(settings: &Settings) -> Self {
        Self::with_retriever(settings, SpeakerSchedulesRetriever::new(&settings.input))
    }

    pub fn with_retriever(settings: &Settings, retriever: SpeakerSchedulesRetriever) -> Self {
        Pipeline {
            retriever,
            composer: EmailComposer::new(
                settings.email.clone(),
                QrCodeGenerator::new(&settings.qr_code),
            ),
            batch_limit: settings.email.batch_limit,
        }
    }

    pub async fn run<M>(&self, mailer: &M) -> Result<RunSummary>
    where
        M: Mailer + ?Sized,
    {
        let schedules = self.retriever.speaker_schedules().await?;
        tracing::info!(speakers = schedules.len(), "matched speakers to sessions");

        let emails = self.composer.compose_all(&schedules)?;
        let sent = dispatch(mailer, &emails, self.batch_limit).await?;

        Ok(RunSummary {
            speakers: schedules.len(),
            composed: emails.len(),
            sent,
        })
    }
}
