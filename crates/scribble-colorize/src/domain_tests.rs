//! Domain-critical regression tests for scribble-colorize.
//!
//! These tests pin down the behavior a user of the colorizer relies on, not
//! just happy paths. Each test documents the regression it guards against.

#[cfg(test)]
mod domain_tests {
    use crate::affinity::{compute_weights, AffinityOptions};
    use crate::api::Colorizer;
    use crate::color::{to_additive_color, to_luma_chroma, Rgb, Yiq};
    use crate::constraint::MarkMask;
    use crate::image::Image;
    use crate::output::Quality;
    use crate::solver::SolverKind;

    /// Deterministic pseudo-random image without pulling in an RNG crate.
    fn noise_image(width: usize, height: usize, seed: u64) -> Image {
        let mut state = seed;
        let mut next = || {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 11) as f64 / (1u64 << 53) as f64
        };
        let pixels = (0..width * height)
            .map(|_| Rgb::new(next(), next(), next()))
            .collect();
        Image::new(width, height, pixels).unwrap()
    }

    fn gray(v: f64) -> Rgb {
        Rgb::new(v, v, v)
    }

    // ========================================================================
    // Color space
    // ========================================================================

    /// If this breaks, it means: the inverse YIQ matrix no longer inverts the
    /// forward one. Every colorized pixel would shift in hue and brightness,
    /// most visibly on saturated colors.
    #[test]
    fn test_round_trip_preserves_every_pixel() {
        let image = noise_image(17, 11, 7);
        let back = to_additive_color(&to_luma_chroma(&image));

        for (a, b) in image.pixels().iter().zip(back.pixels()) {
            assert!(
                (a.r - b.r).abs() < 1e-9 && (a.g - b.g).abs() < 1e-9 && (a.b - b.b).abs() < 1e-9,
                "REGRESSION: {a:?} came back as {b:?}"
            );
        }
        assert_eq!(back.to_rgb8(), image.to_rgb8());
    }

    // ========================================================================
    // Constraints
    // ========================================================================

    /// If this breaks, it means: marked rows are no longer identity rows, or
    /// the solver perturbs an exact starting guess. Painting over the whole
    /// image must reproduce the painted chrominance pixel for pixel.
    #[test]
    fn test_full_constraint_reproduces_hints_exactly() {
        let (w, h) = (6, 5);
        let reference = Image::filled(w, h, gray(0.5)).unwrap();
        let pixels: Vec<Rgb> = (0..w * h)
            .map(|i| Rgb::new(0.1 + 0.8 * (i % w) as f64 / w as f64, 0.3, 0.7))
            .collect();
        let scribble = Image::new(w, h, pixels).unwrap();

        for kind in [SolverKind::BiCgStab, SolverKind::GaussSeidel] {
            let result = Colorizer::new()
                .solver(kind)
                .colorize(&reference, &scribble)
                .unwrap();

            assert!(result.mask().is_full());
            assert_eq!(result.report().quality, Quality::Full);
            for (idx, p) in scribble.pixels().iter().enumerate() {
                let hint = Yiq::from(*p);
                assert_eq!(result.yiq().i()[idx], hint.i, "{kind}: I at {idx}");
                assert_eq!(result.yiq().q()[idx], hint.q, "{kind}: Q at {idx}");
            }
        }
    }

    /// If this breaks, it means: the colorizer invents color where the user
    /// gave none. Without any mark the result must be the plain grayscale
    /// rendering of the reference luminance.
    #[test]
    fn test_no_constraint_is_achromatic() {
        let reference = noise_image(9, 7, 3);
        let scribble = Image::filled(9, 7, Rgb::WHITE).unwrap();

        let result = Colorizer::new().colorize(&reference, &scribble).unwrap();

        assert!(result.yiq().i().iter().all(|&v| v == 0.0));
        assert!(result.yiq().q().iter().all(|&v| v == 0.0));
        assert_eq!(result.report().unreachable_pixels, 9 * 7);
        assert_eq!(result.report().quality, Quality::Full);
        for p in result.image().pixels() {
            assert!((p.r - p.g).abs() < 1e-12 && (p.g - p.b).abs() < 1e-12);
        }
    }

    /// If this breaks, it means: reachability is decided per image instead
    /// of per pixel. Pixels whose every path to a stroke crosses a weight
    /// that underflowed to zero must come out neutral, while the pixels that
    /// do reach the stroke still take its color.
    #[test]
    fn test_isolated_region_is_neutral_next_to_colored_one() {
        // Two bright pixels on a dark field. With a 33x33 window they are a
        // tiny fraction of every window that sees them, so the window
        // variance stays small and weights from the field into them
        // underflow to exactly zero.
        let (w, h) = (66, 66);
        let mut reference = Image::filled(w, h, gray(0.2)).unwrap();
        reference.set(32, 32, gray(0.9));
        reference.set(33, 32, gray(0.9));
        let mut scribble = Image::filled(w, h, Rgb::WHITE).unwrap();
        scribble.set(32, 32, Rgb::new(1.0, 0.0, 0.0));

        let result = Colorizer::new()
            .radius(16)
            .colorize(&reference, &scribble)
            .unwrap();

        let report = result.report();
        assert_eq!(report.marked_pixels, 1);
        assert_eq!(report.unreachable_pixels, w * h - 2);
        assert_eq!(report.quality, Quality::Full);

        let partner = 32 * w + 33;
        let (i, q) = (result.yiq().i()[partner], result.yiq().q()[partner]);
        assert!(
            (i - 0.596).abs() < 1e-4 && (q - 0.211).abs() < 1e-4,
            "reachable pixel should take the stroke chroma: ({i}, {q})"
        );

        let stroke = 32 * w + 32;
        for idx in (0..w * h).filter(|&idx| idx != stroke && idx != partner) {
            assert_eq!(result.yiq().i()[idx], 0.0, "pixel {idx}");
            assert_eq!(result.yiq().q()[idx], 0.0, "pixel {idx}");
        }
    }

    // ========================================================================
    // Affinity
    // ========================================================================

    /// If this breaks, it means: weight normalization was lost. Rows would no
    /// longer describe a weighted average and colors would fade or amplify as
    /// they spread.
    #[test]
    fn test_weights_normalized_for_every_unmarked_pixel() {
        let (w, h) = (13, 9);
        let image = noise_image(w, h, 11);
        let luma = to_luma_chroma(&image);
        let marks: Vec<bool> = (0..w * h).map(|i| i % 5 == 0).collect();
        let mask = MarkMask::new(w, h, marks);

        for radius in [1, 2] {
            let options = AffinityOptions {
                radius,
                ..AffinityOptions::default()
            };
            let graph = compute_weights(luma.luma(), w, h, &mask, &options);
            for idx in 0..w * h {
                let sum: f64 = graph.neighbors(idx).iter().map(|n| n.weight).sum();
                if mask.is_marked(idx) {
                    assert!(graph.neighbors(idx).is_empty());
                } else {
                    assert!(
                        (sum - 1.0).abs() < 1e-9,
                        "REGRESSION: radius {radius}, pixel {idx} weights sum to {sum}"
                    );
                }
            }
        }
    }

    // ========================================================================
    // Propagation
    // ========================================================================

    /// If this breaks, it means: color no longer fades with distance from
    /// the stroke while the solve is in progress, or overshoots the stroke
    /// color. Both show up as halos around scribbles.
    #[test]
    fn test_monotonic_locality_in_uniform_field() {
        let reference = Image::filled(8, 1, gray(0.5)).unwrap();
        let mut scribble = Image::filled(8, 1, Rgb::WHITE).unwrap();
        let red = Rgb::new(1.0, 0.0, 0.0);
        scribble.set(0, 0, red);
        let c = Yiq::from(red).i;

        // Few sweeps: the front is still moving outward.
        let partial = Colorizer::new()
            .solver(SolverKind::GaussSeidel)
            .max_iterations(3)
            .colorize(&reference, &scribble)
            .unwrap();
        let i = partial.yiq().i();
        for x in 1..8 {
            assert!(
                i[x] <= i[x - 1],
                "REGRESSION: chroma rises from {} to {} at x={x}",
                i[x - 1],
                i[x]
            );
            assert!(i[x] <= c && i[x] >= 0.0);
        }
        assert!(i[1] > i[7]);

        // Full solve: the single mark is the only attractor.
        let full = Colorizer::new()
            .tolerance(1e-10)
            .colorize(&reference, &scribble)
            .unwrap();
        for &v in full.yiq().i() {
            assert!((v - c).abs() < 1e-4, "expected {c}, got {v}");
        }
    }

    /// If this breaks, it means: colors bleed across luminance edges. The
    /// defining feature of the method is that a stroke on one side of an
    /// edge does not tint the other side.
    #[test]
    fn test_edge_preservation_across_luminance_step() {
        let (w, h) = (8, 4);
        let pixels = (0..w * h)
            .map(|i| if i % w < 4 { gray(0.2) } else { gray(0.8) })
            .collect();
        let reference = Image::new(w, h, pixels).unwrap();

        let warm = Rgb::from(Yiq::new(0.5, 0.3, 0.0));
        let cool = Rgb::from(Yiq::new(0.5, -0.3, 0.0));
        let mut scribble = Image::filled(w, h, Rgb::WHITE).unwrap();
        scribble.set(0, 0, warm);
        scribble.set(w - 1, h - 1, cool);

        let result = Colorizer::new().colorize(&reference, &scribble).unwrap();
        let i = result.yiq().i();

        for y in 0..h {
            let left = i[y * w + 3];
            let right = i[y * w + 4];
            assert!(
                left - right > 0.4,
                "REGRESSION: row {y} blends across the edge ({left} vs {right})"
            );
            assert!(left > 0.25 && right < -0.25);
        }
    }

    // ========================================================================
    // Scenarios
    // ========================================================================

    /// If this breaks, it means: a single stroke on a flat image no longer
    /// floods the whole image with its color.
    #[test]
    fn test_red_center_floods_flat_3x3() {
        let reference = Image::filled(3, 3, gray(0.5)).unwrap();
        let mut scribble = Image::filled(3, 3, Rgb::WHITE).unwrap();
        scribble.set(1, 1, Rgb::new(1.0, 0.0, 0.0));

        let result = Colorizer::new()
            .radius(1)
            .tolerance(1e-10)
            .colorize(&reference, &scribble)
            .unwrap();

        assert_eq!(result.report().marked_pixels, 1);
        assert_eq!(result.report().unreachable_pixels, 0);
        for idx in 0..9 {
            let i = result.yiq().i()[idx];
            let q = result.yiq().q()[idx];
            assert!(
                (i - 0.596).abs() < 1e-4 && (q - 0.211).abs() < 1e-4,
                "pixel {idx}: ({i}, {q})"
            );
        }
    }

    /// If this breaks, it means: an untouched scribble layer changes the
    /// image. The white sentinel must mean "no opinion", and the luminance
    /// must pass through the pipeline bit for bit.
    #[test]
    fn test_all_white_scribble_keeps_reference_luminance() {
        let reference = noise_image(10, 6, 21);
        let scribble = Image::filled(10, 6, Rgb::WHITE).unwrap();

        let result = Colorizer::new().colorize(&reference, &scribble).unwrap();

        assert!(result.mask().has_no_marks());
        assert_eq!(result.yiq().luma(), to_luma_chroma(&reference).luma());
        assert!(result.yiq().i().iter().chain(result.yiq().q()).all(|&v| v == 0.0));
    }

    /// If this breaks, it means: a grayscale photo with an untouched scribble
    /// no longer comes back unchanged at the byte level.
    #[test]
    fn test_gray_reference_with_white_scribble_is_byte_identical() {
        let bytes: Vec<u8> = (0..4 * 4)
            .flat_map(|i| {
                let v = (i * 16) as u8;
                [v, v, v]
            })
            .collect();
        let reference = Image::from_rgb8(4, 4, &bytes).unwrap();
        let scribble = Image::filled(4, 4, Rgb::WHITE).unwrap();

        let result = Colorizer::new().colorize(&reference, &scribble).unwrap();

        assert_eq!(result.to_rgb8(), bytes);
    }

    /// If this breaks, it means: the difference test against the reference
    /// was dropped. A scribble layer exported as a copy of the reference with
    /// strokes on top would pin every pixel to its own color.
    #[test]
    fn test_scribble_equal_to_reference_is_not_a_constraint() {
        let reference = noise_image(5, 5, 99);
        let scribble = reference.clone();

        let result = Colorizer::new().colorize(&reference, &scribble).unwrap();

        assert!(result.mask().has_no_marks());
    }

    /// If this breaks, it means: recolorizing a color photo lost the
    /// untouched regions. With white pinned to the reference, only the
    /// painted pixel may change; without it, white carries no color and the
    /// single stroke spreads everywhere.
    #[test]
    fn test_pinned_white_keeps_reference_color() {
        let (w, h) = (10, 4);
        let blue = Rgb::new(0.15, 0.25, 0.8);
        let orange = Rgb::new(0.9, 0.55, 0.12);
        let pixels = (0..w * h)
            .map(|i| if i % w < w / 2 { blue } else { orange })
            .collect();
        let reference = Image::new(w, h, pixels).unwrap();
        let mut scribble = Image::filled(w, h, Rgb::WHITE).unwrap();
        let green = Rgb::new(0.1, 0.8, 0.2);
        scribble.set(0, 0, green);

        let pinned = Colorizer::new()
            .pin_white_to_reference(true)
            .colorize(&reference, &scribble)
            .unwrap();

        assert!(pinned.mask().is_full());
        let (orange_yiq, blue_yiq, green_yiq) =
            (Yiq::from(orange), Yiq::from(blue), Yiq::from(green));
        for y in 0..h {
            for x in 0..w {
                let idx = y * w + x;
                let expected = match (x, y) {
                    (0, 0) => green_yiq,
                    _ if x < w / 2 => blue_yiq,
                    _ => orange_yiq,
                };
                let (i, q) = (pinned.yiq().i()[idx], pinned.yiq().q()[idx]);
                assert!(
                    (i - expected.i).abs() < 1e-9 && (q - expected.q).abs() < 1e-9,
                    "pixel ({x},{y}): ({i}, {q}) vs ({}, {})",
                    expected.i,
                    expected.q
                );
            }
        }

        let free = Colorizer::new().colorize(&reference, &scribble).unwrap();
        assert_eq!(free.report().marked_pixels, 1);
        let right = 2 * w + 8;
        assert!((free.yiq().i()[right] - orange_yiq.i).abs() > 0.3);
    }
}
