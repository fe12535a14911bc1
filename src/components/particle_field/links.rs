//! Proximity connections between particles.
//!
//! Connections are never stored: each frame scans the current positions and
//! reports every unordered pair closer than the threshold. Small populations
//! use the plain pairwise scan; larger ones bucket particles into a uniform
//! grid whose cells are one threshold wide, so only neighbouring cells need to
//! be compared.

use std::collections::HashMap;

use super::particles::Particle;

/// Populations above this size use the grid scan.
pub const GRID_SCAN_MIN: usize = 128;

/// A connection between two particles, found during a scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	/// Index of the first particle (always lower than `b`).
	pub a: usize,
	/// Index of the second particle.
	pub b: usize,
	/// Euclidean distance between the two.
	pub distance: f64,
}

/// Opacity of a connection at `distance`, or `None` when the pair is not
/// connected.
///
/// Fades linearly from `max_opacity` for coincident particles to zero at the
/// threshold. Pairs at or beyond the threshold get no connection.
pub fn link_opacity(distance: f64, threshold: f64, max_opacity: f64) -> Option<f64> {
	if distance < threshold {
		Some((1.0 - distance / threshold) * max_opacity)
	} else {
		None
	}
}

/// Calls `visit` for every unordered pair of particles closer than `threshold`.
pub fn for_each_link(particles: &[Particle], threshold: f64, mut visit: impl FnMut(Link)) {
	if threshold.is_nan() || threshold <= 0.0 {
		return;
	}
	if particles.len() > GRID_SCAN_MIN && threshold.is_finite() {
		grid_scan(particles, threshold, &mut visit);
	} else {
		pairwise_scan(particles, threshold, &mut visit);
	}
}

/// Collects all connections into a vector.
#[cfg(test)]
fn collect_links(particles: &[Particle], threshold: f64) -> Vec<Link> {
	let mut links = Vec::new();
	for_each_link(particles, threshold, |link| links.push(link));
	links
}

fn distance(p: &Particle, q: &Particle) -> f64 {
	(p.x - q.x).hypot(p.y - q.y)
}

fn pairwise_scan(particles: &[Particle], threshold: f64, visit: &mut impl FnMut(Link)) {
	for (a, p) in particles.iter().enumerate() {
		for (offset, q) in particles[a + 1..].iter().enumerate() {
			let d = distance(p, q);
			if d < threshold {
				visit(Link {
					a,
					b: a + 1 + offset,
					distance: d,
				});
			}
		}
	}
}

fn grid_scan(particles: &[Particle], threshold: f64, visit: &mut impl FnMut(Link)) {
	let cell_of = |p: &Particle| {
		(
			(p.x / threshold).floor() as i64,
			(p.y / threshold).floor() as i64,
		)
	};

	let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
	for (i, p) in particles.iter().enumerate() {
		cells.entry(cell_of(p)).or_default().push(i);
	}

	for (a, p) in particles.iter().enumerate() {
		let (cx, cy) = cell_of(p);
		for dx in -1..=1 {
			for dy in -1..=1 {
				let Some(bucket) = cells.get(&(cx + dx, cy + dy)) else {
					continue;
				};
				for &b in bucket.iter().filter(|&&b| b > a) {
					let d = distance(p, &particles[b]);
					if d < threshold {
						visit(Link { a, b, distance: d });
					}
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::rngs::SmallRng;
	use rand::{Rng, SeedableRng};

	use super::*;

	fn at(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			radius: 1.0,
			category: None,
		}
	}

	#[test]
	fn connects_strictly_below_threshold() {
		let origin = at(0.0, 0.0);
		for (gap, connected) in [(149.0, true), (150.0, false), (151.0, false)] {
			let links = collect_links(&[origin.clone(), at(gap, 0.0)], 150.0);
			assert_eq!(links.len() == 1, connected, "gap {gap}");
		}
	}

	#[test]
	fn diagonal_distance_is_euclidean() {
		let links = collect_links(&[at(0.0, 0.0), at(90.0, 120.0)], 150.0);
		assert!(links.is_empty());
		let links = collect_links(&[at(0.0, 0.0), at(89.0, 120.0)], 150.0);
		assert_eq!(links.len(), 1);
		assert!((links[0].distance - 89.0f64.hypot(120.0)).abs() < 1e-9);
	}

	#[test]
	fn opacity_scales_with_proximity() {
		assert_eq!(link_opacity(0.0, 150.0, 0.3), Some(0.3));
		let mid = link_opacity(75.0, 150.0, 0.3).unwrap();
		assert!((mid - 0.15).abs() < 1e-12);
		let near_edge = link_opacity(149.999, 150.0, 0.3).unwrap();
		assert!(near_edge > 0.0 && near_edge < 1e-5);
		assert_eq!(link_opacity(150.0, 150.0, 0.3), None);
		assert_eq!(link_opacity(151.0, 150.0, 0.3), None);
	}

	#[test]
	fn zero_threshold_connects_nothing() {
		let links = collect_links(&[at(5.0, 5.0), at(5.0, 5.0)], 0.0);
		assert!(links.is_empty());
	}

	#[test]
	fn each_pair_reported_once_with_ordered_indices() {
		let particles = vec![at(0.0, 0.0), at(10.0, 0.0), at(20.0, 0.0)];
		let links = collect_links(&particles, 150.0);
		let pairs: Vec<_> = links.iter().map(|l| (l.a, l.b)).collect();
		assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
	}

	#[test]
	fn grid_scan_matches_pairwise_scan() {
		let mut rng = SmallRng::seed_from_u64(11);
		let particles: Vec<_> = (0..400)
			.map(|_| at(rng.gen_range(-2.0..1602.0), rng.gen_range(-2.0..902.0)))
			.collect();
		assert!(particles.len() > GRID_SCAN_MIN);

		let mut expected = Vec::new();
		pairwise_scan(&particles, 150.0, &mut |l: Link| expected.push((l.a, l.b)));
		let mut actual: Vec<_> = collect_links(&particles, 150.0)
			.into_iter()
			.map(|l| (l.a, l.b))
			.collect();
		expected.sort_unstable();
		actual.sort_unstable();

		assert!(!expected.is_empty());
		assert_eq!(actual, expected);
	}
}
