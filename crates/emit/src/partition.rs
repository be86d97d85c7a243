//! Balanced split of small kernels across compilation units.

/// The item list is shorter than the requested group count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartitionRefused {
	pub items: usize,
	pub groups: usize,
}

/// Splits `items` into `groups` contiguous slices whose lengths differ by at most one.
///
/// Earlier groups take the remainder. With fewer items than groups the split is refused unless
/// `allow_empty` is set, in which case the surplus groups are empty.
pub fn partition<T>(items: &[T], groups: usize, allow_empty: bool) -> Result<Vec<&[T]>, PartitionRefused> {
	if groups == 0 || (items.len() < groups && !allow_empty) {
		return Err(PartitionRefused {
			items: items.len(),
			groups,
		});
	}

	let base = items.len() / groups;
	let extra = items.len() % groups;
	let mut out = Vec::with_capacity(groups);
	let mut rest = items;
	for j in 0..groups {
		let (head, tail) = rest.split_at(base + usize::from(j < extra));
		out.push(head);
		rest = tail;
	}
	Ok(out)
}
