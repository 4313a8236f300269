//! Order lifecycle on the conveyor
//!
//! Orders spawn at the left, slide right at the conveyor speed whether or not
//! they are complete, and are only removed once past the right bound.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::difficulty::roll_edit_count;
use super::edit::EditType;
use super::order::Order;
use crate::consts::*;

/// Why a spawn attempt did not produce an order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnBlocked {
    NoStations,
    BufferOccupied,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conveyor {
    /// Orders in spawn order (oldest, right-most first)
    pub orders: Vec<Order>,
    /// Seconds until the next spawn attempt
    pub spawn_timer: f32,
}

impl Conveyor {
    pub fn new(initial_delay: f32) -> Self {
        Self {
            orders: Vec::new(),
            spawn_timer: initial_delay,
        }
    }

    /// Count down; true when a spawn attempt is due
    pub fn spawn_due(&mut self, dt: f32) -> bool {
        self.spawn_timer -= dt;
        self.spawn_timer <= 0.0
    }

    /// Create an order needing a random subset of `unlocked` types.
    /// The caller assigns the id and pushes it with `push`.
    pub fn spawn_order<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        id: u32,
        unlocked: &[EditType],
    ) -> Result<Order, SpawnBlocked> {
        if unlocked.is_empty() {
            return Err(SpawnBlocked::NoStations);
        }
        if self.orders.iter().any(Order::in_spawn_buffer) {
            return Err(SpawnBlocked::BufferOccupied);
        }

        let count = roll_edit_count(rng, unlocked.len(), unlocked.len());
        let mut pool = unlocked.to_vec();
        pool.shuffle(rng);
        pool.truncate(count);
        Ok(Order::new(id, pool, ORDER_SPAWN_X))
    }

    pub fn push(&mut self, order: Order) {
        self.orders.push(order);
    }

    /// Move every order along the belt
    pub fn advance(&mut self, speed: f32, dt: f32) {
        for order in &mut self.orders {
            order.x += speed * dt;
        }
    }

    /// Remove and return orders past the exit bound
    pub fn retire(&mut self) -> Vec<Order> {
        let (gone, kept): (Vec<Order>, Vec<Order>) =
            std::mem::take(&mut self.orders).into_iter().partition(Order::has_exited);
        self.orders = kept;
        gone
    }

    /// Incomplete orders crossing the midpoint for the first time
    pub fn take_comments(&mut self) -> Vec<u32> {
        let mid = SCREEN_WIDTH / 2.0;
        self.orders
            .iter_mut()
            .filter(|o| !o.has_shown_comment && !o.is_complete() && o.x >= mid)
            .map(|o| {
                o.has_shown_comment = true;
                o.id
            })
            .collect()
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id == id)
    }
}
