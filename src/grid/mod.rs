//! The map grid: node matrix plus the roster of live organisms

pub mod node;
pub mod vegetation;

pub use node::Node;
pub use vegetation::Vegetation;

use ahash::AHashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{Coord, OrganismId, Tick};
use crate::organism::Organism;
use crate::pathfind::{Pathfinder, SearchSpace};
use crate::simulation::tick::{self, TickEvent};

/// A rectangular lattice of nodes and the organisms living on it
///
/// The grid owns every node and every organism. Organisms are kept in a
/// creation-ordered arena and tombstoned on death, so indices stay stable
/// while a tick pass is iterating. Nodes are stored row-major (y before x);
/// all external addressing goes through `(x, y)` accessors.
pub struct Grid {
    width: i32,
    height: i32,
    nodes: Vec<Node>,
    pub(crate) organisms: Vec<Organism>,
    index: AHashMap<OrganismId, usize>,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) current_tick: Tick,
}

impl Grid {
    /// Create a grid with a nondeterministic RNG seed
    pub fn new(width: i32, height: i32) -> Self {
        Self::from_rng(width, height, ChaCha8Rng::from_entropy())
    }

    /// Create a grid with a fixed seed for reproducible runs
    pub fn with_seed(width: i32, height: i32, seed: u64) -> Self {
        Self::from_rng(width, height, ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(width: i32, height: i32, rng: ChaCha8Rng) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        let mut nodes = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                nodes.push(Node::new(Coord::new(x, y)));
            }
        }
        Self {
            width,
            height,
            nodes,
            organisms: Vec::new(),
            index: AHashMap::new(),
            rng,
            current_tick: 0,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    /// Whether a coordinate lies inside the grid
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    fn flat_index(&self, x: i32, y: i32) -> Result<usize> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return Err(SimError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y * self.width + x) as usize)
    }

    /// Bounds-checked node lookup; out-of-range coordinates are an error,
    /// never clamped
    pub fn get_node(&self, x: i32, y: i32) -> Result<&Node> {
        let idx = self.flat_index(x, y)?;
        Ok(&self.nodes[idx])
    }

    pub fn get_node_mut(&mut self, x: i32, y: i32) -> Result<&mut Node> {
        let idx = self.flat_index(x, y)?;
        Ok(&mut self.nodes[idx])
    }

    /// Node lookup by coordinate
    pub fn node(&self, coord: Coord) -> Result<&Node> {
        self.get_node(coord.x, coord.y)
    }

    pub fn node_mut(&mut self, coord: Coord) -> Result<&mut Node> {
        self.get_node_mut(coord.x, coord.y)
    }

    /// Euclidean distance between two cells
    ///
    /// Doubles as the route-search heuristic and the perception sort key.
    pub fn dist(&self, a: Coord, b: Coord) -> f32 {
        let dx = (a.x - b.x) as f32;
        let dy = (a.y - b.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Cost of stepping from `from` into `to`: the destination's intrinsic
    /// move cost, independent of where the step came from
    pub fn move_cost(&self, _from: Coord, to: Coord) -> f32 {
        self.node(to).map(|n| n.move_cost).unwrap_or(f32::INFINITY)
    }

    /// The up-to-8 in-bounds Moore neighbors of a cell, excluding the cell
    /// itself (8 interior, 5 edge, 3 corner)
    ///
    /// The fixed radius of 1 is what makes route steps single-cell
    /// regardless of an organism's speed.
    pub fn neighbors(&self, of: Coord) -> Vec<Coord> {
        let mut result = Vec::with_capacity(8);
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let candidate = Coord::new(of.x + dx, of.y + dy);
                if self.contains(candidate) {
                    result.push(candidate);
                }
            }
        }
        result
    }

    /// Register a new organism at the given cell
    ///
    /// The organism joins the roster (creation order) and the cell's
    /// occupant list (arrival order) atomically.
    pub fn spawn_organism(&mut self, at: Coord, config: &SimulationConfig) -> Result<OrganismId> {
        let id = OrganismId::new();
        self.insert_organism(Organism::new(id, at, config))?;
        Ok(id)
    }

    pub(crate) fn insert_organism(&mut self, organism: Organism) -> Result<()> {
        let id = organism.id;
        let at = organism.location;
        self.node_mut(at)?.add_occupant(id);
        self.index.insert(id, self.organisms.len());
        self.organisms.push(organism);
        tracing::debug!(?id, %at, "organism registered");
        Ok(())
    }

    pub fn organism(&self, id: OrganismId) -> Option<&Organism> {
        self.index
            .get(&id)
            .map(|&i| &self.organisms[i])
            .filter(|o| o.is_alive())
    }

    pub fn organism_mut(&mut self, id: OrganismId) -> Option<&mut Organism> {
        let idx = self.index.get(&id).copied()?;
        let org = &mut self.organisms[idx];
        if org.is_alive() {
            Some(org)
        } else {
            None
        }
    }

    pub(crate) fn index_of(&self, id: OrganismId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Live organisms in creation order
    pub fn iter_living(&self) -> impl Iterator<Item = &Organism> {
        self.organisms.iter().filter(|o| o.is_alive())
    }

    pub fn live_count(&self) -> usize {
        self.iter_living().count()
    }

    /// Snapshot of live organism ids, in roster order
    ///
    /// Taken at the start of each tick pass so that births and deaths
    /// during the pass cannot disturb iteration; newborns therefore never
    /// act in the tick they are born.
    pub(crate) fn live_roster(&self) -> Vec<OrganismId> {
        self.iter_living().map(|o| o.id).collect()
    }

    /// Simultaneous mutable access to an organism and one node
    ///
    /// The two live in disjoint fields, so the split borrow is done here
    /// where the compiler can see it.
    pub(crate) fn organism_and_node_mut(
        &mut self,
        idx: usize,
        coord: Coord,
    ) -> Result<(&mut Organism, &mut Node)> {
        let flat = self.flat_index(coord.x, coord.y)?;
        Ok((&mut self.organisms[idx], &mut self.nodes[flat]))
    }

    /// Spawn the organism's litter at its current cell
    ///
    /// Offspring inherit the parent's behavioral parameters and start
    /// acting on the next tick. Costs the parent no energy; invoked by
    /// driving policy, never by the decision loop itself.
    pub fn give_birth(&mut self, parent: OrganismId) -> Result<Vec<OrganismId>> {
        crate::simulation::behavior::give_birth(self, parent)
    }

    /// Tombstone an organism and drop it from its cell's occupant list
    pub(crate) fn kill(&mut self, idx: usize) -> Result<()> {
        let id = self.organisms[idx].id;
        let at = self.organisms[idx].location;
        self.node_mut(at)?.remove_occupant(id);
        self.organisms[idx].alive = false;
        self.organisms[idx].path = None;
        self.organisms[idx].goal = None;
        tracing::debug!(?id, %at, "organism died");
        Ok(())
    }

    /// Advance the simulation by exactly one tick
    ///
    /// Every organism alive at the start of the call decides and acts once,
    /// in roster order.
    pub fn advance(&mut self, planner: &impl Pathfinder) -> Result<Vec<TickEvent>> {
        tick::run_tick(self, planner)
    }

    /// Sum of plant amounts across all initialized cells (display/summary)
    pub fn total_vegetation(&self) -> f32 {
        self.nodes
            .iter()
            .filter_map(|n| n.plants().ok())
            .map(|v| v.amount)
            .sum()
    }

    /// All nodes in row-major order (read-only, for rendering)
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }
}

impl SearchSpace for Grid {
    fn neighbors(&self, of: Coord) -> Vec<Coord> {
        Grid::neighbors(self, of)
    }

    fn step_cost(&self, from: Coord, to: Coord) -> f32 {
        self.move_cost(from, to)
    }

    fn heuristic(&self, from: Coord, to: Coord) -> f32 {
        self.dist(from, to)
    }
}
