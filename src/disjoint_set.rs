use crate::error::{PercolationError, Result};

// https://en.wikipedia.org/wiki/Disjoint-set_data_structure
// Weighted by component size, with path halving in `root`.
#[derive(Debug, Clone)]
pub struct DisjointSet {
	parent: Vec<usize>,
	size: Vec<usize>,
	count: usize,
}

impl DisjointSet {
	pub fn make_singletons(size: usize) -> Result<DisjointSet> {
		if size == 0 {
			return Err(PercolationError::invalid("size", size));
		}
		Ok(DisjointSet {
			parent: (0..size).collect(),
			size: vec![1; size],
			count: size,
		})
	}

	/// Number of elements in the universe.
	pub fn len(&self) -> usize {
		self.parent.len()
	}

	/// Number of disjoint components.
	pub fn count(&self) -> usize {
		self.count
	}

	pub fn find(&mut self, x: usize) -> Result<usize> {
		self.check(x)?;
		Ok(self.root(x))
	}

	pub fn connected(&mut self, x: usize, y: usize) -> Result<bool> {
		self.check(x)?;
		self.check(y)?;
		Ok(self.root(x) == self.root(y))
	}

	pub fn component_size(&mut self, x: usize) -> Result<usize> {
		let root = self.find(x)?;
		Ok(self.size[root])
	}

	/// Merges the components of `x` and `y`. Returns false if they were
	/// already one component.
	pub fn unite(&mut self, x: usize, y: usize) -> Result<bool> {
		self.check(x)?;
		self.check(y)?;
		let x_root = self.root(x);
		let y_root = self.root(y);
		if x_root == y_root {
			return Ok(false);
		}
		// smaller tree goes under the larger one; ties go under x
		if self.size[x_root] < self.size[y_root] {
			self.parent[x_root] = y_root;
			self.size[y_root] += self.size[x_root];
		} else {
			self.parent[y_root] = x_root;
			self.size[x_root] += self.size[y_root];
		}
		self.count -= 1;
		Ok(true)
	}

	fn root(&mut self, mut x: usize) -> usize {
		while self.parent[x] != x {
			let grandparent = self.parent[self.parent[x]];
			self.parent[x] = grandparent;
			x = grandparent;
		}
		x
	}

	fn check(&self, x: usize) -> Result<()> {
		if x < self.parent.len() {
			Ok(())
		} else {
			Err(PercolationError::IndexOutOfRange {
				index: x,
				size: self.parent.len(),
			})
		}
	}

	#[cfg(test)]
	fn depth(&self, mut x: usize) -> usize {
		let mut depth = 0;
		while self.parent[x] != x {
			x = self.parent[x];
			depth += 1;
		}
		depth
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_universe_is_rejected() {
		assert_eq!(
			DisjointSet::make_singletons(0).unwrap_err(),
			PercolationError::InvalidArgument { name: "size", value: 0 }
		);
	}

	#[test]
	fn singletons_are_only_connected_to_themselves() {
		let mut ds = DisjointSet::make_singletons(4).unwrap();
		assert_eq!(ds.count(), 4);
		for a in 0..4 {
			for b in 0..4 {
				assert_eq!(ds.connected(a, b).unwrap(), a == b);
			}
		}
	}

	#[test]
	fn unite_is_transitive_and_counts_components() {
		let mut ds = DisjointSet::make_singletons(6).unwrap();
		assert!(ds.unite(0, 1).unwrap());
		assert!(ds.unite(2, 3).unwrap());
		assert!(ds.unite(1, 3).unwrap());
		assert!(!ds.unite(0, 2).unwrap());

		assert!(ds.connected(0, 3).unwrap());
		assert!(ds.connected(3, 0).unwrap());
		assert!(!ds.connected(0, 4).unwrap());
		assert_eq!(ds.count(), 3);
		assert_eq!(ds.component_size(2).unwrap(), 4);
		assert_eq!(ds.component_size(5).unwrap(), 1);
	}

	#[test]
	fn smaller_tree_goes_under_larger() {
		let mut ds = DisjointSet::make_singletons(4).unwrap();
		ds.unite(1, 2).unwrap();
		ds.unite(1, 3).unwrap();
		// {1,2,3} is larger, so 0's root is attached beneath it
		ds.unite(0, 1).unwrap();
		assert_eq!(ds.find(0).unwrap(), ds.find(1).unwrap());
		assert_eq!(ds.find(0).unwrap(), 1);
	}

	#[test]
	fn trees_stay_shallow() {
		let n = 1 << 10;
		let mut ds = DisjointSet::make_singletons(n).unwrap();
		let mut step = 1;
		while step < n {
			for i in (0..n).step_by(2 * step) {
				ds.unite(i + step, i).unwrap();
			}
			step *= 2;
		}
		assert_eq!(ds.count(), 1);
		let deepest = (0..n).map(|x| ds.depth(x)).max().unwrap();
		assert!(deepest <= 10, "depth {} exceeds log2(n)", deepest);
	}

	#[test]
	fn out_of_range_elements_are_rejected() {
		let mut ds = DisjointSet::make_singletons(3).unwrap();
		assert_eq!(
			ds.unite(0, 3).unwrap_err(),
			PercolationError::IndexOutOfRange { index: 3, size: 3 }
		);
		assert!(ds.connected(7, 0).is_err());
		assert!(ds.find(3).is_err());
		assert_eq!(ds.count(), 3);
	}
}
