use crate::{
    algorithms::segment::{EdgeLoop, Segment},
    error::{MaskError, Result},
};

/// Remove back-and-forth spikes from a grown loop and rotate it so that no
/// run of same-direction edges straddles the start of the loop.
pub fn canonicalize(mut edges: EdgeLoop) -> Result<EdgeLoop> {
    cancel_reversals(&mut edges);

    if edges.is_empty() {
        return Err(MaskError::InvariantViolation(
            "edge loop collapsed to nothing while removing reversals".to_string(),
        ));
    }

    rotate_runs_to_front(&mut edges)?;
    Ok(edges)
}

fn cancel_reversals(edges: &mut EdgeLoop) {
    // Reduced prefix kept as a stack: an edge opposite the top cancels it,
    // which also exposes the pair a deletion just made adjacent.
    let mut reduced: Vec<Segment> = Vec::with_capacity(edges.segments.len());
    for segment in edges.segments.drain(..) {
        match reduced.last() {
            Some(top) if top.direction.is_opposite(segment.direction) => {
                reduced.pop();
            }
            _ => reduced.push(segment),
        }
    }

    // Reversals straddling the wrap-around
    let (mut first, mut end) = (0, reduced.len());
    while end - first >= 2 && reduced[first].direction.is_opposite(reduced[end - 1].direction) {
        first += 1;
        end -= 1;
    }
    reduced.truncate(end);
    reduced.drain(..first);

    edges.segments = reduced;
}

fn rotate_runs_to_front(edges: &mut EdgeLoop) -> Result<()> {
    let segments = &mut edges.segments;
    let lead = segments[0].direction;
    let trailing = segments
        .iter()
        .rev()
        .take_while(|segment| segment.direction == lead)
        .count();

    if trailing == segments.len() {
        return Err(MaskError::InvariantViolation(format!(
            "edge loop of {} segments all heading {lead}",
            segments.len()
        )));
    }

    segments.rotate_right(trailing);
    Ok(())
}
