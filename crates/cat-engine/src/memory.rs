//! Memory channel navigation
//!
//! The rig refuses to select an unprogrammed channel and says nothing when
//! it does, so stepping through memories is a probe loop: command a
//! candidate, wait out the settle time, then ask which channel the rig is
//! actually on. Only the `MC` re-query decides whether a probe landed.

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::sleep;
use tracing::debug;

use cat_wire::{memory, ChannelReply, CHANNEL_MAX, CHANNEL_MIN};

use crate::error::EngineError;
use crate::session::CatSession;

/// A memory channel the rig landed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHit {
    /// Channel the rig reports after the recall
    pub channel: u32,
    /// Tag stored with the channel, when readable
    pub tag: Option<String>,
    /// Frequency after the recall, when readable
    pub frequency_hz: Option<u64>,
}

/// Step to the next programmed channel in the given direction
///
/// Candidates advance from `from` with wraparound in [1,124]; each channel
/// is visited at most once before the search reports
/// [`EngineError::SearchExhausted`]. Callers treat exhaustion as "no
/// additional programmed memories", not as a fault.
pub async fn find_next_channel<T>(
    session: &mut CatSession<T>,
    from: u32,
    direction: i32,
) -> Result<MemoryHit, EngineError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    session.set_inhibit(session.config().memory_inhibit());

    let span = (CHANNEL_MAX - CHANNEL_MIN + 1) as usize;
    let mut candidate = from;
    for _ in 0..span {
        candidate = memory::step(candidate, direction);

        session.select_memory_mode().await?;
        sleep(session.config().probe_mode_settle()).await;
        session.select_channel(candidate).await?;
        sleep(session.config().probe_select_settle()).await;

        if let Some(ChannelReply::Channel(actual)) = session.query_channel().await? {
            if actual == candidate {
                return finish_recall(session, actual).await;
            }
        }
    }

    Err(EngineError::SearchExhausted)
}

/// Recall a specific channel directly
///
/// The returned hit names the channel the rig reports afterwards, which
/// for an unprogrammed channel is wherever the rig stayed.
pub async fn recall_channel<T>(
    session: &mut CatSession<T>,
    channel: u32,
) -> Result<MemoryHit, EngineError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    if !memory::in_range(channel) {
        return Err(EngineError::InvalidChannel { requested: channel });
    }

    session.select_memory_mode().await?;
    sleep(session.config().recall_mode_settle()).await;
    session.set_inhibit(session.config().memory_inhibit());
    session.select_channel(channel).await?;
    sleep(session.config().recall_select_settle()).await;

    let landed = match session.query_channel().await? {
        Some(ChannelReply::Channel(actual)) => {
            if actual != channel {
                debug!("Rig reports channel {} after recalling {}", actual, channel);
            }
            actual
        }
        _ => channel,
    };

    finish_recall(session, landed).await
}

/// Tag and frequency follow-up shared by both recall paths
///
/// The tag read is best-effort at the protocol level: a silent or garbled
/// reply leaves the hit tagless without invalidating it.
async fn finish_recall<T>(
    session: &mut CatSession<T>,
    channel: u32,
) -> Result<MemoryHit, EngineError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    let tag = session.read_tag(channel).await?;
    let frequency_hz = session.read_frequency().await?;

    session.state_mut().set_channel(channel);
    session.state_mut().channel_tag = tag.clone();
    session.set_inhibit(session.config().memory_inhibit());

    Ok(MemoryHit {
        channel,
        tag,
        frequency_hz,
    })
}
