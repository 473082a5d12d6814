//! Storage Module Tests
//!
//! Validates the in-process store against the protocol contract: set
//! operations, value-kind checks, TTL-based expiry, and the round-robin
//! partition assigner.

#[cfg(test)]
mod tests {
    use crate::config::ClusterConfig;
    use crate::storage::memory::MemoryStore;
    use crate::storage::partitioner::ShardAssigner;
    use crate::storage::protocol::{
        doc_key, docset_key, pos_key, term_key, SetStore, StoreError,
    };
    use std::time::Duration;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // ============================================================
    // KEY NAMING
    // ============================================================

    #[test]
    fn test_keys_carry_affinity_tag() {
        // All keys of one shard share the same braced tag prefix, so they
        // colocate for multi-key operations.
        assert_eq!(term_key("2", "whale"), "{2}term:whale");
        assert_eq!(docset_key("2"), "{2}docset");
        assert_eq!(doc_key("2", "35"), "{2}doc:35");
        assert_eq!(pos_key("2", "whale", "35"), "{2}pos:whale-35");
    }

    // ============================================================
    // SET OPERATIONS
    // ============================================================

    #[test]
    fn test_set_add_and_members() {
        let store = MemoryStore::new();
        store.set_add("s", &strings(&["a", "b"])).unwrap();
        store.set_add("s", &strings(&["b", "c"])).unwrap();

        let mut members = store.set_members("s").unwrap();
        members.sort();
        assert_eq!(members, vec!["a", "b", "c"]);
        assert_eq!(store.set_card("s").unwrap(), 3);
    }

    #[test]
    fn test_absent_set_reads_empty() {
        let store = MemoryStore::new();
        assert!(!store.exists("nope").unwrap());
        assert!(store.set_members("nope").unwrap().is_empty());
        assert_eq!(store.set_card("nope").unwrap(), 0);
    }

    #[test]
    fn test_union_into() {
        let store = MemoryStore::new();
        store.set_add("a", &strings(&["1", "2"])).unwrap();
        store.set_add("b", &strings(&["2", "3"])).unwrap();

        let card = store.union_into("dest", &strings(&["a", "b"])).unwrap();
        assert_eq!(card, 3);
        let mut members = store.set_members("dest").unwrap();
        members.sort();
        assert_eq!(members, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_intersect_into() {
        let store = MemoryStore::new();
        store.set_add("a", &strings(&["1", "2"])).unwrap();
        store.set_add("b", &strings(&["2", "3"])).unwrap();

        let card = store.intersect_into("dest", &strings(&["a", "b"])).unwrap();
        assert_eq!(card, 1);
        assert_eq!(store.set_members("dest").unwrap(), vec!["2"]);
    }

    #[test]
    fn test_diff_into_order_matters() {
        let store = MemoryStore::new();
        store.set_add("universe", &strings(&["1", "2", "3"])).unwrap();
        store.set_add("hits", &strings(&["2"])).unwrap();

        let card = store
            .diff_into("dest", &strings(&["universe", "hits"]))
            .unwrap();
        assert_eq!(card, 2);
        let mut members = store.set_members("dest").unwrap();
        members.sort();
        assert_eq!(members, vec!["1", "3"]);

        // Reversed sources subtract the universe from the hits instead.
        let card = store
            .diff_into("dest", &strings(&["hits", "universe"]))
            .unwrap();
        assert_eq!(card, 0);
    }

    #[test]
    fn test_store_into_replaces_dest() {
        let store = MemoryStore::new();
        store.set_add("stale", &strings(&["x", "y", "z"])).unwrap();
        store.set_add("a", &strings(&["1"])).unwrap();

        store.union_into("stale", &strings(&["a"])).unwrap();
        assert_eq!(store.set_members("stale").unwrap(), vec!["1"]);
    }

    #[test]
    fn test_delete() {
        let store = MemoryStore::new();
        store.set_add("s", &strings(&["a"])).unwrap();
        store.delete("s").unwrap();
        assert!(!store.exists("s").unwrap());
        // Deleting an absent key is not an error.
        store.delete("s").unwrap();
    }

    // ============================================================
    // VALUE KINDS
    // ============================================================

    #[test]
    fn test_wrong_kind_rejected() {
        let store = MemoryStore::new();
        store.hash_set("record", "name", "Moby Dick").unwrap();

        assert_eq!(
            store.set_members("record").unwrap_err(),
            StoreError::WrongType("record".to_string())
        );
        assert!(store.list_append("record", &[1]).is_err());
    }

    #[test]
    fn test_hash_fields() {
        let store = MemoryStore::new();
        store.hash_set("doc", "name", "Moby Dick").unwrap();
        store.hash_set("doc", "author", "Melville").unwrap();

        assert_eq!(
            store.hash_get("doc", "name").unwrap().unwrap(),
            "Moby Dick"
        );
        assert!(store.hash_get("doc", "missing").unwrap().is_none());
        assert_eq!(store.hash_get_all("doc").unwrap().len(), 2);
        assert!(store.hash_get_all("nope").unwrap().is_empty());
    }

    #[test]
    fn test_position_lists_append_in_order() {
        let store = MemoryStore::new();
        store.list_append("pos", &[4, 9]).unwrap();
        store.list_append("pos", &[17]).unwrap();

        assert_eq!(store.list_len("pos").unwrap(), 3);
        assert_eq!(store.list_get("pos"), vec![4, 9, 17]);
        assert_eq!(store.list_len("nope").unwrap(), 0);
    }

    // ============================================================
    // EXPIRY
    // ============================================================

    #[test]
    fn test_expired_key_reads_absent() {
        let store = MemoryStore::new();
        store.set_add("tmp", &strings(&["a"])).unwrap();
        store.expire("tmp", Duration::from_millis(20)).unwrap();

        assert!(store.exists("tmp").unwrap());
        std::thread::sleep(Duration::from_millis(60));
        assert!(!store.exists("tmp").unwrap());
        assert!(store.set_members("tmp").unwrap().is_empty());
    }

    #[test]
    fn test_expire_on_absent_key_is_noop() {
        let store = MemoryStore::new();
        store.expire("nope", Duration::from_millis(5)).unwrap();
        assert!(!store.exists("nope").unwrap());
    }

    #[test]
    fn test_rewriting_dest_clears_old_ttl() {
        let store = MemoryStore::new();
        store.set_add("a", &strings(&["1"])).unwrap();
        store.union_into("dest", &strings(&["a"])).unwrap();
        store.expire("dest", Duration::from_millis(20)).unwrap();

        // A fresh result under the same name must not inherit the deadline.
        store.union_into("dest", &strings(&["a"])).unwrap();
        std::thread::sleep(Duration::from_millis(60));
        assert!(store.exists("dest").unwrap());
    }

    #[test]
    fn test_keys_with_prefix() {
        let store = MemoryStore::new();
        store.set_add("{0}term:blue", &strings(&["1"])).unwrap();
        store.set_add("{0}term:red", &strings(&["2"])).unwrap();
        store.set_add("{1}term:blue", &strings(&["3"])).unwrap();

        assert_eq!(store.keys_with_prefix("{0}term:").len(), 2);
        assert_eq!(store.keys_with_prefix("tmp:").len(), 0);
        assert_eq!(store.key_count(), 3);
    }

    // ============================================================
    // PARTITION ASSIGNER
    // ============================================================

    #[test]
    fn test_round_robin_assignment() {
        let config = ClusterConfig::new(3).unwrap();
        let assigner = ShardAssigner::new(&config);

        for i in 0..30 {
            assert_eq!(assigner.assign(i), i % 3);
        }
    }

    #[test]
    fn test_every_document_lands_on_exactly_one_shard() {
        let config = ClusterConfig::new(4).unwrap();
        let assigner = ShardAssigner::new(&config);

        for i in 0..100 {
            let shard = assigner.assign(i);
            assert!(shard < assigner.shard_count());
            let owners = (0..assigner.shard_count())
                .filter(|&s| s == assigner.assign(i))
                .count();
            assert_eq!(owners, 1);
        }
    }
}
