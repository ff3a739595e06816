//! # Concurrency Flows
//!
//! Reader threads query a shared `RoutingIndexService` while a writer keeps
//! advertising items and closing rounds. Local items are re-folded into
//! layer 0 on every round, so once advertised they must stay visible at
//! distance 0 for every reader.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    use attenuated_bloom::{
        AdvertisementPublisher, AttenuatedBloomFilter, AttenuatedConfig, PublishError,
        RoutingIndexApi, RoutingIndexService,
    };

    use crate::integration::init_test_logging;

    struct NullPublisher;

    impl AdvertisementPublisher for NullPublisher {
        fn publish(&self, _: &AttenuatedBloomFilter) -> Result<(), PublishError> {
            Ok(())
        }
    }

    #[test]
    fn test_readers_never_lose_local_items() {
        init_test_logging();
        let config = AttenuatedConfig::new(4, 2_000, 0.01).unwrap();
        let service = Arc::new(RoutingIndexService::new(&config, Arc::new(NullPublisher)).unwrap());
        let advertised = Arc::new(AtomicUsize::new(0));
        const ITEMS: usize = 500;

        thread::scope(|scope| {
            scope.spawn(|| {
                for i in 0..ITEMS {
                    service
                        .advertise_local(format!("item_{}", i).as_bytes())
                        .unwrap();
                    advertised.store(i + 1, Ordering::Release);
                    if i % 50 == 0 {
                        service.propagate().unwrap();
                    }
                }
            });

            for _ in 0..4 {
                scope.spawn(|| loop {
                    let seen = advertised.load(Ordering::Acquire);
                    for i in 0..seen {
                        assert_eq!(
                            service.lookup(format!("item_{}", i).as_bytes()),
                            Some(0),
                            "item_{} vanished from layer 0",
                            i
                        );
                    }
                    if seen == ITEMS {
                        break;
                    }
                });
            }
        });

        assert!(service.rounds() >= ITEMS as u64 / 50);
    }

    #[test]
    fn test_concurrent_receives_all_land() {
        init_test_logging();
        let config = AttenuatedConfig::new(3, 1_000, 0.01).unwrap();
        let service = RoutingIndexService::new(&config, Arc::new(NullPublisher)).unwrap();

        thread::scope(|scope| {
            for n in 0..8 {
                let service = &service;
                let config = &config;
                scope.spawn(move || {
                    let mut neighbor = AttenuatedBloomFilter::from_config(config).unwrap();
                    neighbor.insert_at(0, format!("neighbor_{}", n)).unwrap();
                    service.receive(&neighbor).unwrap();
                });
            }
        });

        service.propagate().unwrap();
        for n in 0..8 {
            assert_eq!(
                service.lookup(format!("neighbor_{}", n).as_bytes()),
                Some(1)
            );
        }
    }
}
