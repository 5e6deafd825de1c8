//! Property-based tests for scope chains and caching
//!
//! Uses proptest to verify invariants of the container:
//! 1. Shared instances - repeated `get` calls return the same instance
//! 2. Fresh instances - `create` never returns a cached instance
//! 3. Scope isolation - siblings and parents never see a child's cache
//! 4. Case insensitivity - any casing of a name resolves to one entry

use bucket_di::{Container, TypeDescriptor, TypeRegistry};
use proptest::prelude::*;
use std::sync::Arc;

#[derive(Default)]
struct Service;

fn container() -> Container {
	let registry = Arc::new(TypeRegistry::new());
	registry.register(TypeDescriptor::with_default::<Service>("Service"));
	Container::new(registry)
}

fn casing() -> impl Strategy<Value = String> {
	proptest::collection::vec(any::<bool>(), 7).prop_map(|upper| {
		"service"
			.chars()
			.zip(upper)
			.map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
			.collect()
	})
}

proptest! {
	// Property 1 & 4: every casing, every call, one instance
	#[test]
	fn prop_get_is_idempotent(names in proptest::collection::vec(casing(), 2..10)) {
		let container = container();
		let first = container.get(&names[0]).unwrap();
		for name in &names[1..] {
			let again = container.get(name).unwrap();
			prop_assert!(Arc::ptr_eq(&first, &again));
		}
	}

	// Property 2
	#[test]
	fn prop_create_is_always_fresh(count in 2usize..10) {
		let container = container();
		let shared = container.get("Service").unwrap();
		let created: Vec<_> = (0..count).map(|_| container.create("Service").unwrap()).collect();
		for (i, instance) in created.iter().enumerate() {
			prop_assert!(!Arc::ptr_eq(instance, &shared));
			for other in &created[i + 1..] {
				prop_assert!(!Arc::ptr_eq(instance, other));
			}
		}
	}

	// Property 3: a chain of children each see the root instance when the root
	// resolved first, and none of them leak upwards otherwise
	#[test]
	fn prop_children_share_ancestor_state(depth in 1usize..8, root_first in any::<bool>()) {
		let root = container();
		let mut chain = vec![root.make_child()];
		for _ in 1..depth {
			let next = chain.last().unwrap().make_child();
			chain.push(next);
		}

		if root_first {
			let from_root = root.get("Service").unwrap();
			for child in &chain {
				prop_assert!(Arc::ptr_eq(&child.get("Service").unwrap(), &from_root));
			}
		} else {
			let leaf = chain.last().unwrap();
			let from_leaf = leaf.get("Service").unwrap();
			prop_assert!(!root.has("Service"));
			for child in &chain[..chain.len() - 1] {
				prop_assert!(!child.has("Service"));
			}
			prop_assert!(!Arc::ptr_eq(&root.get("Service").unwrap(), &from_leaf));
		}
	}
}
