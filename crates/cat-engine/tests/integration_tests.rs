//! Integration tests for the CAT engine
//!
//! These tests drive the full actor against a virtual rig over a duplex
//! pipe and verify:
//! - Reply attribution with concurrent callers and background polls
//! - Poll inhibit windows after foreground operations
//! - Memory search probing order, direct recall, and exhaustion
//! - Frequency digit edits including the forced return to VFO
//! - Preset application wire traffic and skip rules
//! - Menu snapshot sentinel behavior
//! - The transmit status fallback chain

use std::time::Duration;

use cat_engine::{run_engine_actor, EngineCommand, EngineConfig, EngineError, EngineEvent};
use cat_rigsim::{run_virtual_rig_task, VirtualRig, VirtualRigCommand, VirtualRigConfig};
use cat_wire::{OperatingMode, PresetRecord, MENU_SENTINEL};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::sleep;

// ============================================================================
// Helper Functions
// ============================================================================

mod helpers {
    use super::*;

    /// Channels a test uses to drive an engine wired to a virtual rig
    pub struct TestBench {
        pub cmd_tx: mpsc::Sender<EngineCommand>,
        pub event_rx: mpsc::Receiver<EngineEvent>,
        pub rig_tx: mpsc::Sender<VirtualRigCommand>,
    }

    /// Timing configuration with hardware delays shrunk for fast tests
    pub fn fast_config() -> EngineConfig {
        EngineConfig {
            reply_timeout_ms: 200,
            raw_timeout_ms: 200,
            menu_timeout_ms: 100,
            meter_poll_ms: 25,
            frequency_poll_ms: 40,
            tx_poll_ms: 30,
            tune_inhibit_ms: 300,
            memory_inhibit_ms: 300,
            preset_inhibit_ms: 300,
            preset_pacing_ms: 1,
            set_settle_ms: 1,
            probe_mode_settle_ms: 1,
            probe_select_settle_ms: 1,
            recall_mode_settle_ms: 1,
            recall_select_settle_ms: 1,
            vfo_check_delay_ms: 1,
            ..EngineConfig::default()
        }
    }

    /// Spawn the engine actor and a virtual rig on the two ends of a pipe
    pub fn spawn_bench(rig: VirtualRig, config: EngineConfig) -> TestBench {
        let (engine_io, rig_io) = tokio::io::duplex(1024);
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (event_tx, event_rx) = mpsc::channel(1024);
        let (rig_tx, rig_rx) = mpsc::channel(16);
        let (state_tx, _) = broadcast::channel(64);

        tokio::spawn(run_virtual_rig_task(rig_io, rig, rig_rx, state_tx));
        tokio::spawn(run_engine_actor(engine_io, config, cmd_rx, event_tx));

        TestBench {
            cmd_tx,
            event_rx,
            rig_tx,
        }
    }

    /// Send one command to the actor and await its reply
    pub async fn send_command<R>(
        cmd_tx: &mpsc::Sender<EngineCommand>,
        make: impl FnOnce(oneshot::Sender<R>) -> EngineCommand,
    ) -> R {
        let (tx, rx) = oneshot::channel();
        cmd_tx.send(make(tx)).await.expect("actor gone");
        rx.await.expect("actor dropped the response")
    }

    /// Drain and return the rig's log of processed commands
    pub async fn take_log(bench: &TestBench) -> Vec<String> {
        let (tx, rx) = oneshot::channel();
        bench
            .rig_tx
            .send(VirtualRigCommand::TakeCommandLog { response: tx })
            .await
            .expect("rig gone");
        rx.await.expect("rig dropped the response")
    }

    /// Wait until the event stream produces an event matching the predicate
    pub async fn wait_for_event(
        event_rx: &mut mpsc::Receiver<EngineEvent>,
        mut pred: impl FnMut(&EngineEvent) -> bool,
    ) -> EngineEvent {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let event = event_rx.recv().await.expect("event stream ended");
                if pred(&event) {
                    return event;
                }
            }
        })
        .await
        .expect("timed out waiting for event")
    }
}

// ============================================================================
// Reply Attribution Tests
// ============================================================================

mod serialization_tests {
    use super::*;

    #[tokio::test]
    async fn concurrent_commands_never_swap_replies() {
        let mut rig = VirtualRig::new();
        rig.set_menu_value("011", "AAA");
        rig.set_menu_value("012", "BBB");
        let bench = helpers::spawn_bench(rig, helpers::fast_config());

        // Two callers issue distinguishable queries while the pollers keep
        // hammering the same wire
        let mut tasks = Vec::new();
        for i in 0..10 {
            let cmd_tx = bench.cmd_tx.clone();
            let code = if i % 2 == 0 { "011" } else { "012" };
            tasks.push(tokio::spawn(async move {
                let reply = helpers::send_command(&cmd_tx, |tx| EngineCommand::RawCommand {
                    text: format!("EX{}", code),
                    response: tx,
                })
                .await
                .expect("raw command failed");
                (code, reply)
            }));
        }

        for task in tasks {
            let (code, reply) = task.await.unwrap();
            let expected = if code == "011" { "EX011AAA" } else { "EX012BBB" };
            assert_eq!(reply.as_deref(), Some(expected));
        }
    }

    #[tokio::test]
    async fn startup_identifies_the_rig() {
        let rig = VirtualRig::new();
        let mut bench = helpers::spawn_bench(rig, helpers::fast_config());

        let event = helpers::wait_for_event(&mut bench.event_rx, |e| {
            matches!(e, EngineEvent::Identified { .. })
        })
        .await;
        match event {
            EngineEvent::Identified { id, recognized } => {
                assert_eq!(id, "0670");
                assert!(recognized);
            }
            other => panic!("unexpected event {:?}", other),
        }

        // The greeting also reports the initial frequency
        let event = helpers::wait_for_event(&mut bench.event_rx, |e| {
            matches!(e, EngineEvent::Frequency { .. })
        })
        .await;
        match event {
            EngineEvent::Frequency { hz, display } => {
                assert_eq!(hz, 14_250_000);
                assert_eq!(display, "14.250.000");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}

// ============================================================================
// Polling Tests
// ============================================================================

mod polling_tests {
    use super::*;

    #[tokio::test]
    async fn inhibited_poll_ticks_write_nothing() {
        let mut rig = VirtualRig::new();
        rig.program_channel(7, "CAL", 14_300_000, OperatingMode::Usb);
        let bench = helpers::spawn_bench(rig, helpers::fast_config());

        // Let polling get going, then run a foreground operation that
        // closes with a 300ms inhibit window
        sleep(Duration::from_millis(100)).await;
        let hit = helpers::send_command(&bench.cmd_tx, |tx| EngineCommand::RecallChannel {
            channel: 7,
            response: tx,
        })
        .await
        .expect("recall failed");
        assert_eq!(hit.channel, 7);

        // Discard the recall's own traffic, then sit inside the window
        let _ = helpers::take_log(&bench).await;
        sleep(Duration::from_millis(150)).await;
        let log = helpers::take_log(&bench).await;
        assert!(log.is_empty(), "polls ran during inhibit: {:?}", log);

        // Once the window passes, polling resumes on its own
        sleep(Duration::from_millis(300)).await;
        let log = helpers::take_log(&bench).await;
        assert!(!log.is_empty(), "polling never resumed");
    }

    #[tokio::test]
    async fn transmit_status_falls_back_when_tx_is_mute() {
        let config = VirtualRigConfig {
            tx_status_replies: false,
            info_replies: false,
            ..VirtualRigConfig::default()
        };
        let mut rig = VirtualRig::from_config(config);
        rig.set_power_raw(180);
        let mut bench = helpers::spawn_bench(rig, helpers::fast_config());

        bench
            .rig_tx
            .send(VirtualRigCommand::SetTransmit(true))
            .await
            .unwrap();

        // With TX and IF both mute, only the power meter can reveal the
        // keyed transmitter
        let event = helpers::wait_for_event(&mut bench.event_rx, |e| {
            matches!(e, EngineEvent::Transmit { active: true })
        })
        .await;
        assert!(matches!(event, EngineEvent::Transmit { active: true }));
    }

    #[tokio::test]
    async fn meter_polls_alternate_channels() {
        let rig = VirtualRig::new();
        let bench = helpers::spawn_bench(rig, helpers::fast_config());

        sleep(Duration::from_millis(200)).await;
        let log = helpers::take_log(&bench).await;
        let meters: Vec<&String> = log.iter().filter(|c| c.starts_with("RM")).collect();
        assert!(meters.len() >= 2, "expected meter traffic, got {:?}", log);
        // Consecutive meter reads flip between RM1 and RM5
        for pair in meters.windows(2) {
            assert_ne!(pair[0], pair[1], "meter channel did not alternate");
        }
    }
}

// ============================================================================
// Memory Channel Tests
// ============================================================================

mod memory_tests {
    use super::*;

    #[tokio::test]
    async fn step_probes_in_order_until_the_programmed_channel() {
        let mut rig = VirtualRig::new();
        rig.program_channel(59, "FT8", 7_074_000, OperatingMode::DataU);
        let bench = helpers::spawn_bench(rig, helpers::fast_config());

        let _ = helpers::take_log(&bench).await;
        let hit = helpers::send_command(&bench.cmd_tx, |tx| EngineCommand::StepMemory {
            direction: 1,
            response: tx,
        })
        .await
        .expect("step failed");

        assert_eq!(hit.channel, 59);
        assert_eq!(hit.tag.as_deref(), Some("FT8"));
        assert_eq!(hit.frequency_hz, Some(7_074_000));

        // Every candidate from 2 through 59 was offered exactly once, in order
        let log = helpers::take_log(&bench).await;
        let selects: Vec<&String> = log
            .iter()
            .filter(|c| c.len() == 5 && c.starts_with("MC"))
            .collect();
        let expected: Vec<String> = (2..=59).map(|ch| format!("MC{:03}", ch)).collect();
        assert_eq!(selects.len(), expected.len(), "selects: {:?}", selects);
        for (got, want) in selects.iter().zip(expected.iter()) {
            assert_eq!(*got, want);
        }
    }

    #[tokio::test]
    async fn step_exhausts_on_an_empty_bank() {
        let rig = VirtualRig::new();
        let bench = helpers::spawn_bench(rig, helpers::fast_config());

        let result = helpers::send_command(&bench.cmd_tx, |tx| EngineCommand::StepMemory {
            direction: 1,
            response: tx,
        })
        .await;
        assert!(matches!(result, Err(EngineError::SearchExhausted)));
    }

    #[tokio::test]
    async fn direct_recall_lands_with_tag_and_frequency() {
        let mut rig = VirtualRig::new();
        rig.program_channel(12, "NETS", 3_843_000, OperatingMode::Lsb);
        let bench = helpers::spawn_bench(rig, helpers::fast_config());

        let hit = helpers::send_command(&bench.cmd_tx, |tx| EngineCommand::RecallChannel {
            channel: 12,
            response: tx,
        })
        .await
        .expect("recall failed");

        assert_eq!(hit.channel, 12);
        assert_eq!(hit.tag.as_deref(), Some("NETS"));
        assert_eq!(hit.frequency_hz, Some(3_843_000));
    }

    #[tokio::test]
    async fn recall_rejects_out_of_range_channels() {
        let rig = VirtualRig::new();
        let bench = helpers::spawn_bench(rig, helpers::fast_config());

        let result = helpers::send_command(&bench.cmd_tx, |tx| EngineCommand::RecallChannel {
            channel: 125,
            response: tx,
        })
        .await;
        assert!(matches!(
            result,
            Err(EngineError::InvalidChannel { requested: 125 })
        ));
    }
}

// ============================================================================
// Frequency Edit Tests
// ============================================================================

mod tuning_tests {
    use super::*;

    #[tokio::test]
    async fn digit_edit_publishes_the_rig_answer() {
        let rig = VirtualRig::new(); // 14.250.000 USB
        let bench = helpers::spawn_bench(rig, helpers::fast_config());

        // Editable digit 5 is the 1 kHz position
        let hz = helpers::send_command(&bench.cmd_tx, |tx| EngineCommand::AdjustDigit {
            digit_index: 5,
            direction: 1,
            response: tx,
        })
        .await
        .expect("edit failed");
        assert_eq!(hz, 14_251_000);

        let hz = helpers::send_command(&bench.cmd_tx, |tx| EngineCommand::AdjustDigit {
            digit_index: 5,
            direction: -1,
            response: tx,
        })
        .await
        .expect("edit failed");
        assert_eq!(hz, 14_250_000);
    }

    #[tokio::test]
    async fn digit_edit_forces_vfo_after_a_memory_recall() {
        let mut rig = VirtualRig::new();
        rig.program_channel(7, "CAL", 14_300_000, OperatingMode::Usb);
        let bench = helpers::spawn_bench(rig, helpers::fast_config());

        let _ = helpers::send_command(&bench.cmd_tx, |tx| EngineCommand::RecallChannel {
            channel: 7,
            response: tx,
        })
        .await
        .expect("recall failed");
        let _ = helpers::take_log(&bench).await;

        let hz = helpers::send_command(&bench.cmd_tx, |tx| EngineCommand::AdjustDigit {
            digit_index: 8,
            direction: 1,
            response: tx,
        })
        .await
        .expect("edit failed");
        assert_eq!(hz, 14_300_001);

        // The rig was pushed back to the VFO before the frequency write
        let log = helpers::take_log(&bench).await;
        let vfo_at = log.iter().position(|c| c == "VM0");
        let set_at = log.iter().position(|c| c.starts_with("FA0"));
        assert!(vfo_at.is_some(), "no VM0 in {:?}", log);
        assert!(set_at.is_some(), "no frequency write in {:?}", log);
        assert!(vfo_at < set_at, "VM0 did not precede the write: {:?}", log);
    }

    #[tokio::test]
    async fn out_of_range_digit_index_is_rejected() {
        let rig = VirtualRig::new();
        let bench = helpers::spawn_bench(rig, helpers::fast_config());

        let result = helpers::send_command(&bench.cmd_tx, |tx| EngineCommand::AdjustDigit {
            digit_index: 9,
            direction: 1,
            response: tx,
        })
        .await;
        assert!(matches!(
            result,
            Err(EngineError::InvalidDigit { requested: 9 })
        ));
    }

    #[tokio::test]
    async fn set_mode_confirms_from_the_rig() {
        let rig = VirtualRig::new();
        let bench = helpers::spawn_bench(rig, helpers::fast_config());

        let confirmed = helpers::send_command(&bench.cmd_tx, |tx| EngineCommand::SetMode {
            mode: OperatingMode::Cw,
            response: tx,
        })
        .await
        .expect("mode change failed");
        assert_eq!(confirmed, OperatingMode::Cw);
    }
}

// ============================================================================
// Preset and Snapshot Tests
// ============================================================================

mod preset_tests {
    use super::*;

    #[tokio::test]
    async fn apply_skips_unusable_records() {
        let rig = VirtualRig::new();
        let mut bench = helpers::spawn_bench(rig, helpers::fast_config());

        let _ = helpers::take_log(&bench).await;
        let records = vec![
            PresetRecord::new("053", "1"),
            PresetRecord::new("999", ""),
        ];
        let applied = helpers::send_command(&bench.cmd_tx, |tx| EngineCommand::ApplyPreset {
            records,
            response: tx,
        })
        .await
        .expect("apply failed");
        assert_eq!(applied, 1);

        // Exactly one menu write went over the wire
        let log = helpers::take_log(&bench).await;
        let menu_writes: Vec<&String> = log.iter().filter(|c| c.starts_with("EX")).collect();
        assert_eq!(menu_writes, vec!["EX0531"]);

        // Progress covered both records, counting only the one applied
        let mut progress = Vec::new();
        while let Ok(event) = bench.event_rx.try_recv() {
            if let EngineEvent::PresetProgress {
                index,
                total,
                applied,
            } = event
            {
                progress.push((index, total, applied));
            }
        }
        assert_eq!(progress, vec![(1, 2, 1), (2, 2, 1)]);
    }

    #[tokio::test]
    async fn snapshot_reads_sentinel_for_silent_items() {
        let config = VirtualRigConfig {
            silent_menu_codes: vec!["055".to_string()],
            ..VirtualRigConfig::default()
        };
        let mut rig = VirtualRig::from_config(config);
        rig.set_menu_value("053", "1");
        let bench = helpers::spawn_bench(rig, helpers::fast_config());

        let readings = helpers::send_command(&bench.cmd_tx, |tx| EngineCommand::ReadMenus {
            response: tx,
        })
        .await
        .expect("snapshot failed");

        assert_eq!(readings.len(), cat_wire::menu_table::MENU_ITEMS.len());

        let silent = readings.iter().find(|r| r.code == "055").unwrap();
        assert_eq!(silent.value, MENU_SENTINEL);
        assert!(silent.is_sentinel());

        let set = readings.iter().find(|r| r.code == "053").unwrap();
        assert_eq!(set.value, "1");

        // Codes after the silent one were still processed
        let last = readings.last().unwrap();
        assert_eq!(last.code, "153");
        assert!(!last.is_sentinel());
    }
}
