use rm_core::Image;

use crate::{Boundaries, PixelLoop, PixelPoint};

// 8-neighborhood direction tables. Directions index into (dy, dx) deltas;
// the clockwise table drives the initial neighbor search, the
// counter-clockwise table drives border following.
const DIR_TO_DELT_CW: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const DIR_TO_DELT_CCW: [(i32, i32); 8] = [
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const DELT_PLUS_1_TO_DIR_CW: [i32; 9] = [5, 6, 7, 4, -1, 0, 3, 2, 1];
const DELT_PLUS_1_TO_DIR_CCW: [i32; 9] = [3, 2, 1, 4, -1, 0, 5, 6, 7];

#[inline]
fn delt_to_dir_cw(dy: i32, dx: i32) -> i32 {
    DELT_PLUS_1_TO_DIR_CW[((dy + 1) * 3 + (dx + 1)) as usize]
}

#[inline]
fn delt_to_dir_ccw(dy: i32, dx: i32) -> i32 {
    DELT_PLUS_1_TO_DIR_CCW[((dy + 1) * 3 + (dx + 1)) as usize]
}

/// Trace all borders of a binary mask (foreground iff value `> 0`).
///
/// Returns outer borders and hole borders as implicitly closed pixel loops
/// in raster discovery order. Single-pixel blobs yield single-point loops;
/// degenerate loops are the caller's concern.
pub fn trace_boundaries(mask: &Image<u8>) -> Boundaries {
    let w = mask.width();
    let h = mask.height();

    let mut out = Boundaries::default();
    if w == 0 || h == 0 {
        return out;
    }

    // Label buffer with a one-pixel zero margin so the scan never needs
    // bounds checks and edge-touching blobs trace like interior ones.
    let pw = w + 2;
    let ph = h + 2;
    let mut labels = vec![0i32; pw * ph];
    for y in 0..h {
        for (x, &v) in mask.row(y).iter().enumerate() {
            if v > 0 {
                labels[(y + 1) * pw + (x + 1)] = 1;
            }
        }
    }

    let mut curr_id: i32 = 1;

    for y0 in 1..=h {
        for x0 in 1..=w {
            let f0 = labels[y0 * pw + x0];

            // Border start conditions: an unvisited foreground pixel with
            // background to its west starts an outer border; a foreground
            // pixel with background to its east starts a hole border.
            let (is_hole, mut y2, mut x2);
            if f0 == 1 && labels[y0 * pw + x0 - 1] == 0 {
                is_hole = false;
                y2 = y0 as i32;
                x2 = x0 as i32 - 1;
            } else if f0 >= 1 && labels[y0 * pw + x0 + 1] == 0 {
                is_hole = true;
                y2 = y0 as i32;
                x2 = x0 as i32 + 1;
            } else {
                continue;
            }

            curr_id += 1;
            let mut points: PixelLoop = Vec::new();

            // Clockwise search around the start pixel for the first
            // foreground neighbor.
            let dir0 = delt_to_dir_cw(y2 - y0 as i32, x2 - x0 as i32);
            let mut first: Option<(i32, i32)> = None;
            for d in 0..8 {
                let (dy, dx) = DIR_TO_DELT_CW[((dir0 + d) % 8) as usize];
                let ny = y0 as i32 + dy;
                let nx = x0 as i32 + dx;
                if labels[ny as usize * pw + nx as usize] != 0 {
                    first = Some((ny, nx));
                    break;
                }
            }

            let Some((y1, x1)) = first else {
                // Isolated pixel: a one-point loop.
                labels[y0 * pw + x0] = -curr_id;
                points.push(PixelPoint {
                    x: x0 as i32 - 1,
                    y: y0 as i32 - 1,
                });
                push_loop(&mut out, is_hole, points);
                continue;
            };

            y2 = y1;
            x2 = x1;
            let mut y3 = y0 as i32;
            let mut x3 = x0 as i32;

            loop {
                points.push(PixelPoint {
                    x: x3 - 1,
                    y: y3 - 1,
                });

                // Counter-clockwise search for the next border pixel,
                // starting just after the previous one.
                let dir0 = delt_to_dir_ccw(y2 - y3, x2 - x3);
                let mut east_was_examined = false;
                let mut next = (0i32, 0i32);
                let mut found = false;
                for d in 0..8 {
                    let (dy, dx) = DIR_TO_DELT_CCW[((dir0 + d + 1) % 8) as usize];
                    if dy == 0 && dx == 1 {
                        east_was_examined = true;
                    }
                    let ny = y3 + dy;
                    let nx = x3 + dx;
                    if labels[ny as usize * pw + nx as usize] != 0 {
                        next = (ny, nx);
                        found = true;
                        break;
                    }
                }
                debug_assert!(found, "border pixel must have a foreground neighbor");
                if !found {
                    break;
                }
                let (y4, x4) = next;

                // Label the current pixel: negative when its east neighbor
                // is background examined during the search, positive when
                // still unvisited.
                let idx3 = y3 as usize * pw + x3 as usize;
                if east_was_examined && labels[idx3 + 1] == 0 {
                    labels[idx3] = -curr_id;
                } else if labels[idx3] == 1 {
                    labels[idx3] = curr_id;
                }

                // Back at the start in the starting configuration.
                if y4 == y0 as i32 && x4 == x0 as i32 && y3 == y1 && x3 == x1 {
                    break;
                }

                y2 = y3;
                x2 = x3;
                y3 = y4;
                x3 = x4;
            }

            push_loop(&mut out, is_hole, points);
        }
    }

    out
}

fn push_loop(out: &mut Boundaries, is_hole: bool, points: PixelLoop) {
    if is_hole {
        out.holes.push(points);
    } else {
        out.outer.push(points);
    }
}
