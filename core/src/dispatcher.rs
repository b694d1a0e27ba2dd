use crate::mail::{Email, MailError, Mailer};

/// Send the first `limit` emails in order.
///
/// The first failure is returned and nothing after it is attempted. Returns
/// the number of emails sent.
pub async fn dispatch<M>(mailer: &M, emails: &[Email], limit: usize) -> Result<usize, MailError>
where
    M: Mailer + ?Sized,
{
    if emails.len() > limit {
        tracing::info!(
            composed = emails.len(),
            limit,
            "batch limit reached, remaining emails are not sent"
        );
    }

    let mut sent = 0;
    for email in emails.iter().take(limit) {
        tracing::info!(to = ?email.to, subject = %email.subject, "sending email");
        mailer.send(email).await?;
        sent += 1;
    }

    Ok(sent)
}
