// src/track.rs
//! Ordered waypoint sequences and track-level aggregates

use crate::error::{GpsError, Result};
use crate::waypoint::Waypoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// An insertion-ordered sequence of waypoints.
///
/// Aggregates (distance, speed) walk consecutive pairs in the stored
/// order; nothing is re-sorted or deduplicated. Index-taking methods
/// follow `Vec` semantics and panic when the index is out of bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    waypoints: Vec<Waypoint>,
}

impl Track {
    pub fn new() -> Self {
        Self {
            waypoints: Vec::new(),
        }
    }

    /// Append a waypoint at the end of the track.
    pub fn push(&mut self, waypoint: Waypoint) {
        self.waypoints.push(waypoint);
    }

    /// Insert a waypoint at the front of the track.
    pub fn prepend(&mut self, waypoint: Waypoint) {
        self.waypoints.insert(0, waypoint);
    }

    /// Insert a waypoint before `index`. Panics if `index > len`.
    pub fn insert(&mut self, index: usize, waypoint: Waypoint) {
        self.waypoints.insert(index, waypoint);
    }

    /// Remove and return the waypoint at `index`. Panics if out of bounds.
    pub fn remove(&mut self, index: usize) -> Waypoint {
        self.waypoints.remove(index)
    }

    /// Replace the waypoint at `index`, returning the previous one.
    /// Panics if out of bounds.
    pub fn replace(&mut self, index: usize, waypoint: Waypoint) -> Waypoint {
        std::mem::replace(&mut self.waypoints[index], waypoint)
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Waypoint> {
        self.waypoints.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Waypoint> {
        self.waypoints.iter()
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Great-circle distance in meters between the waypoints at two
    /// indices. Panics if either index is out of bounds.
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.waypoints[a].distance_to(&self.waypoints[b])
    }

    /// Sum of the consecutive-pair distances over the whole track, in
    /// meters.
    pub fn total_distance(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }

    /// Running distance total in meters, one entry per waypoint.
    ///
    /// The first entry is 0; an empty track yields an empty sequence.
    pub fn accumulated_distance(&self) -> Vec<f64> {
        let mut totals = Vec::with_capacity(self.waypoints.len());
        let mut sum = 0.0;
        for (i, waypoint) in self.waypoints.iter().enumerate() {
            if i > 0 {
                sum += self.waypoints[i - 1].distance_to(waypoint);
            }
            totals.push(sum);
        }
        totals
    }

    /// Speed over each consecutive pair: pair distance in kilometers over
    /// the elapsed seconds between the two timestamps.
    ///
    /// Fails with `ZeroDuration` when a pair shares one timestamp or when
    /// either waypoint has none.
    pub fn instant_speed(&self) -> Result<Vec<f64>> {
        let mut speeds = Vec::with_capacity(self.waypoints.len().saturating_sub(1));
        for i in 1..self.waypoints.len() {
            speeds.push(self.pair_speed(i)?);
        }
        Ok(speeds)
    }

    /// Average of the per-pair speeds for pairs `(i - 1, i)` with `i` in
    /// `from..to`; the defaults cover the whole track.
    ///
    /// Bounds are clamped to the track; a range holding no pairs yields
    /// 0.0 rather than an error.
    pub fn average_speed(&self, from: Option<usize>, to: Option<usize>) -> Result<f64> {
        let len = self.waypoints.len();
        let lo = from.unwrap_or(1).max(1).min(len);
        let hi = to.unwrap_or(len).min(len);
        if hi <= lo {
            return Ok(0.0);
        }

        let mut sum = 0.0;
        for i in lo..hi {
            sum += self.pair_speed(i)?;
        }
        Ok(sum / (hi - lo) as f64)
    }

    /// Each waypoint's altitude in meters, in track order.
    pub fn elevation_profile(&self) -> Vec<f64> {
        self.waypoints.iter().map(Waypoint::altitude).collect()
    }

    fn pair_speed(&self, i: usize) -> Result<f64> {
        let prev = &self.waypoints[i - 1];
        let next = &self.waypoints[i];
        let (start, end) = match (prev.timestamp(), next.timestamp()) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(GpsError::ZeroDuration),
        };
        let elapsed = (end - start).num_milliseconds() as f64 / 1000.0;
        if elapsed == 0.0 {
            return Err(GpsError::ZeroDuration);
        }
        Ok(prev.distance_to(next) / 1000.0 / elapsed)
    }
}

impl Index<usize> for Track {
    type Output = Waypoint;

    fn index(&self, index: usize) -> &Waypoint {
        &self.waypoints[index]
    }
}

impl IndexMut<usize> for Track {
    fn index_mut(&mut self, index: usize) -> &mut Waypoint {
        &mut self.waypoints[index]
    }
}

impl IntoIterator for Track {
    type Item = Waypoint;
    type IntoIter = std::vec::IntoIter<Waypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.waypoints.into_iter()
    }
}

impl<'a> IntoIterator for &'a Track {
    type Item = &'a Waypoint;
    type IntoIter = std::slice::Iter<'a, Waypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.waypoints.iter()
    }
}

impl FromIterator<Waypoint> for Track {
    fn from_iter<I: IntoIterator<Item = Waypoint>>(iter: I) -> Self {
        Self {
            waypoints: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Track with {} waypoints", self.len())?;
        for waypoint in &self.waypoints {
            writeln!(f, "  {}", waypoint)?;
        }
        Ok(())
    }
}
