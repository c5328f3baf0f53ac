/// Disjoint-set forest over node ids, with union by rank and path compression.
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl DisjointSet {
    pub fn new(size: usize) -> Self {
        DisjointSet {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        // Iterative so that long chains on large grids can't blow the stack
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merges the sets containing `x` and `y`.
    /// Returns `false` if they were already in the same set.
    pub fn unite(&mut self, x: usize, y: usize) -> bool {
        let (a, b) = (self.find(x), self.find(y));
        if a == b {
            return false;
        }

        // Hang the shallower tree under the deeper one
        let (root, child) = if self.rank[a] < self.rank[b] { (b, a) } else { (a, b) };
        self.parent[child] = root;
        if self.rank[root] == self.rank[child] {
            self.rank[root] += 1;
        }
        true
    }

    pub fn same_set(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }
}
