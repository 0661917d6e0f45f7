use crate::data::Site;
use crate::disjoint_set::DisjointSet;
use crate::error::{PercolationError, Result};

/// An `n`x`n` grid of sites, each blocked or open, addressed with 1-based
/// `(row, col)`. Opening is one-way.
///
/// Connectivity is tracked in two disjoint sets over the flat site indices:
///
/// * `links` has two extra elements, a virtual top (`n*n`) joined to every
///   open site in row 1 and a virtual bottom (`n*n + 1`) joined to every open
///   site in row `n`. The grid percolates iff the two are connected.
/// * `fill` has only the virtual top. A site is full iff it is connected to
///   the top here. Without the bottom node a site touching only the bottom
///   boundary cannot reach the top through it after percolation (backwash).
#[derive(Debug, Clone)]
pub struct Percolation {
    n: usize,
    open: Vec<Vec<bool>>,
    open_count: usize,
    links: DisjointSet,
    fill: DisjointSet,
}

impl Percolation {
    /// Creates an `n`x`n` grid with every site blocked.
    pub fn new(n: usize) -> Result<Percolation> {
        if n == 0 {
            return Err(PercolationError::invalid("n", n));
        }
        let sites = n
            .checked_mul(n)
            .and_then(|s| s.checked_add(2))
            .ok_or(PercolationError::invalid("n", n))?;
        Ok(Percolation {
            n,
            open: vec![vec![false; n]; n],
            open_count: 0,
            links: DisjointSet::make_singletons(sites)?,
            fill: DisjointSet::make_singletons(sites - 1)?,
        })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn number_of_open_sites(&self) -> usize {
        self.open_count
    }

    fn virtual_top(&self) -> usize {
        self.n * self.n
    }

    fn virtual_bottom(&self) -> usize {
        self.n * self.n + 1
    }

    fn site(&self, row: usize, col: usize) -> Result<Site> {
        let site = Site::new(row, col);
        if site.in_bounds(self.n) {
            Ok(site)
        } else {
            Err(PercolationError::IndexOutOfBounds { row, col, n: self.n })
        }
    }

    fn open_at(&self, site: Site) -> bool {
        self.open[site.row - 1][site.col - 1]
    }

    /// Opens the site if it is blocked and joins it to its open neighbours.
    /// Opening an open site does nothing.
    pub fn open(&mut self, row: usize, col: usize) -> Result<()> {
        let site = self.site(row, col)?;
        if self.open_at(site) {
            return Ok(());
        }
        self.open[site.row - 1][site.col - 1] = true;
        self.open_count += 1;

        let idx = site.flat_index(self.n);
        if site.row == 1 {
            let top = self.virtual_top();
            self.links.unite(idx, top)?;
            self.fill.unite(idx, top)?;
        }
        if site.row == self.n {
            let bottom = self.virtual_bottom();
            self.links.unite(idx, bottom)?;
        }
        for next in site.neighbors(self.n) {
            if self.open_at(next) {
                let other = next.flat_index(self.n);
                self.links.unite(idx, other)?;
                self.fill.unite(idx, other)?;
            }
        }
        Ok(())
    }

    pub fn is_open(&self, row: usize, col: usize) -> Result<bool> {
        let site = self.site(row, col)?;
        Ok(self.open_at(site))
    }

    /// Whether the site is open and connected to row 1 through open sites.
    pub fn is_full(&mut self, row: usize, col: usize) -> Result<bool> {
        let site = self.site(row, col)?;
        let top = self.virtual_top();
        self.fill.connected(site.flat_index(self.n), top)
    }

    pub fn percolates(&mut self) -> bool {
        let (top, bottom) = (self.virtual_top(), self.virtual_bottom());
        // both virtual nodes always exist
        self.links.connected(top, bottom).unwrap_or(false)
    }
}
