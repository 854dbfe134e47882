//! Multi-threaded construction and lookup against one registry.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Barrier;
use std::thread;

use anidl_registry::{EntityRegistry, LookupError, RegisterError, Registered, entity, key};

#[derive(Debug)]
struct Episode {
	namespace: String,
	episode_id: i64,
	episode_number: u32,
}

entity!(Episode { episode_id, episode_number });

fn episode(id: i64, namespace: &str) -> Episode {
	Episode {
		namespace: namespace.to_string(),
		episode_id: id,
		episode_number: 1,
	}
}

fn registry() -> EntityRegistry {
	let registry = EntityRegistry::new();
	registry.declare_index::<Episode>(&["episode_id"]).unwrap();
	registry
}

#[test]
fn racing_constructions_admit_exactly_one_winner() {
	const THREADS: usize = 8;
	let registry = registry();
	let barrier = Barrier::new(THREADS);
	let winners = AtomicUsize::new(0);

	let survivors: Vec<Registered<Episode>> = thread::scope(|s| {
		let handles: Vec<_> = (0..THREADS)
			.map(|_| {
				s.spawn(|| {
					barrier.wait();
					match registry.construct(episode(42, "race")) {
						Ok(ep) => {
							winners.fetch_add(1, Ordering::SeqCst);
							Some(ep)
						}
						Err(RegisterError::DuplicateInstance { .. }) => None,
						Err(other) => panic!("unexpected error: {other}"),
					}
				})
			})
			.collect();
		handles.into_iter().filter_map(|h| h.join().unwrap()).collect()
	});

	assert_eq!(winners.load(Ordering::SeqCst), 1);
	assert_eq!(survivors.len(), 1);
	let found = registry.lookup::<Episode>(&key![42], "race").unwrap();
	assert!(Registered::ptr_eq(&found, &survivors[0]));
}

#[test]
fn distinct_keys_across_threads_all_register() {
	let registry = registry();

	let owned: Vec<Registered<Episode>> = thread::scope(|s| {
		let handles: Vec<_> = (0..4)
			.map(|t| {
				let registry = &registry;
				s.spawn(move || {
					(0..100)
						.map(|i| registry.construct(episode(t * 1000 + i, "bulk")).unwrap())
						.collect::<Vec<_>>()
				})
			})
			.collect();
		handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
	});

	assert_eq!(owned.len(), 400);
	assert_eq!(registry.live_count::<Episode>("bulk"), 400);
}

#[test]
fn lookups_racing_reclamation_never_see_a_dead_instance() {
	let registry = registry();
	let barrier = Barrier::new(2);

	thread::scope(|s| {
		s.spawn(|| {
			barrier.wait();
			for round in 0..500 {
				let ep = registry.construct(episode(round, "churn")).unwrap();
				drop(ep);
			}
		});
		s.spawn(|| {
			barrier.wait();
			for round in 0..500 {
				match registry.lookup::<Episode>(&key![round], "churn") {
					Ok(ep) => assert_eq!(ep.episode_id, round),
					Err(LookupError::InstanceReclaimed { .. } | LookupError::InstanceNotFound { .. }) => {}
					Err(other) => panic!("unexpected error: {other}"),
				}
			}
		});
	});

	assert_eq!(registry.live_count::<Episode>("churn"), 0);
	assert_eq!(registry.prune_stale::<Episode>("churn"), 500);
}

#[test]
fn clear_all_racing_construction_loses_no_live_entry() {
	let registry = registry();

	let owned: Vec<Registered<Episode>> = thread::scope(|s| {
		let builder = s.spawn(|| {
			(0..200)
				.map(|i| registry.construct(episode(i, "ns")).unwrap())
				.collect::<Vec<_>>()
		});
		s.spawn(|| {
			for _ in 0..50 {
				registry.clear_all::<Episode>();
			}
		});
		builder.join().unwrap()
	});

	// Whatever survived the clears is resolvable and points at the owned instance.
	for (key, slot) in registry.instances::<Episode>("ns") {
		let live = slot.unwrap();
		assert!(owned.iter().any(|ep| Registered::ptr_eq(ep, &live)));
		assert!(registry.lookup::<Episode>(&key, "ns").is_ok());
	}
}
