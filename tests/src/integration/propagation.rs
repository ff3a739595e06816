//! # Propagation Flows
//!
//! Nodes in a line topology `0 - 1 - 2 - 3` each hold one item. Every round
//! each node propagates its index, then every advertisement is delivered to
//! the node's direct neighbors. After enough rounds each node knows the
//! other items at their true hop distance, up to the filter depth.
//!
//! Advertisements cross the "wire" as raw words plus dimensions, the way an
//! external transport would carry them.

use std::sync::Arc;

use parking_lot::Mutex;

use attenuated_bloom::{
    AdvertisementPublisher, AttenuatedBloomFilter, AttenuatedConfig, BloomFilter, FilterError,
    PublishError, RoutingIndexApi, RoutingIndexService,
};

/// One layer as a transport would carry it
#[derive(Clone, Debug)]
pub struct WireLayer {
    pub words: Vec<u64>,
    pub bit_count: usize,
    pub hash_count: usize,
}

/// Flatten an advertisement into wire layers
pub fn to_wire(advertisement: &AttenuatedBloomFilter) -> Vec<WireLayer> {
    advertisement
        .layers()
        .iter()
        .map(|layer| WireLayer {
            words: layer.words().to_vec(),
            bit_count: layer.bit_count(),
            hash_count: layer.hash_count(),
        })
        .collect()
}

/// Rebuild an advertisement from wire layers
pub fn from_wire(layers: Vec<WireLayer>) -> Result<AttenuatedBloomFilter, FilterError> {
    let filters = layers
        .into_iter()
        .map(|layer| BloomFilter::from_raw_parts(layer.words, layer.bit_count, layer.hash_count))
        .collect::<Result<Vec<_>, _>>()?;
    AttenuatedBloomFilter::from_layers(filters)
}

/// Publisher that keeps the last advertisement for the test network to deliver
#[derive(Default)]
pub struct Outbox {
    last: Mutex<Option<Vec<WireLayer>>>,
}

impl Outbox {
    pub fn take(&self) -> Option<Vec<WireLayer>> {
        self.last.lock().take()
    }
}

impl AdvertisementPublisher for Outbox {
    fn publish(&self, advertisement: &AttenuatedBloomFilter) -> Result<(), PublishError> {
        *self.last.lock() = Some(to_wire(advertisement));
        Ok(())
    }
}

/// A routing node wired to its own outbox
pub struct Node {
    pub service: RoutingIndexService<Outbox>,
    pub outbox: Arc<Outbox>,
}

impl Node {
    pub fn new(config: &AttenuatedConfig) -> Result<Self, FilterError> {
        let outbox = Arc::new(Outbox::default());
        let service = RoutingIndexService::new(config, outbox.clone())?;
        Ok(Self { service, outbox })
    }
}

/// Run one propagation round over a line topology
pub fn run_line_round(nodes: &[Node]) {
    for node in nodes {
        node.service.propagate().expect("in-memory publish cannot fail");
    }
    let outgoing: Vec<Option<Vec<WireLayer>>> = nodes.iter().map(|n| n.outbox.take()).collect();

    for (i, advertisement) in outgoing.into_iter().enumerate() {
        let Some(wire) = advertisement else { continue };
        let received = from_wire(wire).expect("well-formed advertisement");

        let neighbors = [i.checked_sub(1), Some(i + 1).filter(|&j| j < nodes.len())];
        for j in neighbors.into_iter().flatten() {
            nodes[j]
                .service
                .receive(&received)
                .expect("uniformly configured nodes");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::init_test_logging;

    fn line(count: usize, depth: usize) -> Vec<Node> {
        let config = AttenuatedConfig::new(depth, 100, 0.001).unwrap();
        let nodes: Vec<Node> = (0..count).map(|_| Node::new(&config).unwrap()).collect();
        for (i, node) in nodes.iter().enumerate() {
            node.service
                .advertise_local(format!("item_{}", i).as_bytes())
                .unwrap();
        }
        nodes
    }

    #[test]
    fn test_line_topology_converges_to_hop_distances() {
        init_test_logging();
        let nodes = line(4, 3);

        for _ in 0..3 {
            run_line_round(&nodes);
        }

        let lookup = |node: usize, item: usize| {
            nodes[node]
                .service
                .lookup(format!("item_{}", item).as_bytes())
        };

        assert_eq!(lookup(0, 0), Some(0));
        assert_eq!(lookup(0, 1), Some(1));
        assert_eq!(lookup(0, 2), Some(2));
        assert_eq!(lookup(0, 3), None, "Three hops is beyond depth 3");

        assert_eq!(lookup(1, 0), Some(1));
        assert_eq!(lookup(1, 2), Some(1));
        assert_eq!(lookup(1, 3), Some(2));

        assert_eq!(lookup(3, 2), Some(1));
        assert_eq!(lookup(3, 1), Some(2));
    }

    #[test]
    fn test_knowledge_spreads_one_hop_per_round() {
        init_test_logging();
        let nodes = line(3, 4);

        // Round 1 publishes local items only
        run_line_round(&nodes);
        assert_eq!(nodes[0].service.lookup(b"item_1"), None);

        run_line_round(&nodes);
        assert_eq!(nodes[0].service.lookup(b"item_1"), Some(1));
        assert_eq!(nodes[0].service.lookup(b"item_2"), None);

        run_line_round(&nodes);
        assert_eq!(nodes[0].service.lookup(b"item_2"), Some(2));
    }

    #[test]
    fn test_wire_round_trip_preserves_layers() {
        let mut advertisement = AttenuatedBloomFilter::new(3, 500, 0.01).unwrap();
        advertisement.insert_at(0, "here").unwrap();
        advertisement.insert_at(2, "there").unwrap();

        let rebuilt = from_wire(to_wire(&advertisement)).unwrap();

        assert_eq!(rebuilt.contains("here"), Some(0));
        assert_eq!(rebuilt.contains("there"), Some(2));
        assert_eq!(rebuilt.layer_info(), advertisement.layer_info());
    }

    #[test]
    fn test_corrupt_wire_layer_rejected() {
        let advertisement = AttenuatedBloomFilter::new(2, 500, 0.01).unwrap();
        let mut wire = to_wire(&advertisement);
        wire[1].words.pop();

        assert!(matches!(
            from_wire(wire),
            Err(FilterError::WordCountMismatch { .. })
        ));
    }
}
