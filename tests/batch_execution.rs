use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::anyhow;
use futures::executor::block_on;
use quick_launcher::batch::{
    decorate_label, BatchPolicy, ExecutionMode, Operand, BATCH_CUE,
};
use quick_launcher::settings::Settings;

#[derive(Debug, Clone, PartialEq)]
struct Entity {
    id: u32,
    name: String,
}

fn entities(n: u32) -> Vec<Entity> {
    (0..n)
        .map(|id| Entity {
            id,
            name: format!("entity {id}"),
        })
        .collect()
}

#[test]
fn batch_respects_ceiling() {
    let policy = BatchPolicy::new(3);
    let seen = Mutex::new(Vec::new());
    let singles = AtomicUsize::new(0);
    let report = block_on(policy.execute(
        true,
        Operand::Many(entities(5)),
        |_| {
            singles.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        },
        |e: Entity| {
            seen.lock().unwrap().push(e.id);
            async { Ok(()) }
        },
    ));

    assert_eq!(report.mode, ExecutionMode::Batch);
    assert_eq!(report.dispatched(), 3);
    assert_eq!(report.dropped, 2);
    assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    assert_eq!(singles.load(Ordering::SeqCst), 0);

    let labels: Vec<String> = entities(5)
        .iter()
        .enumerate()
        .map(|(i, e)| policy.decorate(e, i, |e| e.name.as_str()))
        .collect();
    for (i, label) in labels.iter().enumerate() {
        assert_eq!(label.starts_with(BATCH_CUE), i < 3, "{label}");
    }
}

#[test]
fn sequence_operand_batches_without_gesture() {
    let policy = BatchPolicy::new(10);
    let count = AtomicUsize::new(0);
    let report = block_on(policy.execute(
        false,
        Operand::from(entities(4)),
        |_| async { Err(anyhow!("single must not run")) },
        |_| {
            count.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        },
    ));
    assert_eq!(report.mode, ExecutionMode::Batch);
    assert_eq!(count.load(Ordering::SeqCst), 4);
    assert_eq!(report.dropped, 0);
}

#[test]
fn single_operand_runs_single_action_once() {
    let policy = BatchPolicy::new(3);
    let singles = Mutex::new(Vec::new());
    let batches = AtomicUsize::new(0);
    let report = block_on(policy.execute(
        false,
        Operand::Single(Entity {
            id: 1,
            name: "one".into(),
        }),
        |e: Entity| {
            singles.lock().unwrap().push(e.id);
            async { Ok(()) }
        },
        |_| {
            batches.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        },
    ));
    assert_eq!(report.mode, ExecutionMode::Single);
    assert_eq!(*singles.lock().unwrap(), vec![1]);
    assert_eq!(batches.load(Ordering::SeqCst), 0);
    assert!(report.into_result().is_ok());
}

#[test]
fn failing_action_does_not_stop_siblings() {
    let policy = BatchPolicy::new(5);
    let ran = AtomicUsize::new(0);
    let report = block_on(policy.execute(
        true,
        Operand::Many(entities(4)),
        |_| async { Ok(()) },
        |e: Entity| {
            ran.fetch_add(1, Ordering::SeqCst);
            async move {
                if e.id == 0 {
                    Err(anyhow!("entity 0 failed"))
                } else {
                    Ok(())
                }
            }
        },
    ));
    assert_eq!(ran.load(Ordering::SeqCst), 4);
    assert_eq!(report.failures(), 1);
    assert!(report.outcomes[1..].iter().all(|o| o.is_ok()));
    let err = report.into_result().unwrap_err();
    assert_eq!(err.root_cause().to_string(), "entity 0 failed");
}

#[test]
fn single_failure_is_returned_as_is() {
    let policy = BatchPolicy::new(5);
    let report = block_on(policy.execute(
        false,
        Operand::Single(1),
        |_| async { Err(anyhow!("tab closed")) },
        |_| async { Ok(()) },
    ));
    assert_eq!(report.into_result().unwrap_err().to_string(), "tab closed");
}

#[test]
fn decorate_boundary() {
    let entity = Entity {
        id: 9,
        name: "name".into(),
    };
    assert_eq!(decorate_label(&entity, 2, |e| e.name.as_str(), 2), "name");
    assert_eq!(
        decorate_label(&entity, 1, |e| e.name.as_str(), 2),
        format!("{BATCH_CUE}name")
    );
}

#[test]
fn policy_reads_ceiling_from_settings() {
    let settings = Settings {
        max_operands_num: 7,
        ..Settings::default()
    };
    let policy = BatchPolicy::from_settings(&settings);
    assert_eq!(policy.max_operands_num(), 7);
    assert_eq!(policy.mode(false, &Operand::Single(())), ExecutionMode::Single);
    assert_eq!(policy.mode(true, &Operand::Single(())), ExecutionMode::Batch);
    assert_eq!(policy.mode(false, &Operand::<()>::Many(vec![])), ExecutionMode::Batch);
}
