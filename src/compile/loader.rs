//! First compiler pass: document tree to raw per-vehicle timelines.
//!
//! # Document shape
//!
//! ```json
//! {
//!   "units": { "length": "feet", "angle": "degrees" },
//!   "repeat": 1,
//!   "drones": [ { "startPosition": [0, 0, 0] } ],
//!   "chor": [
//!     { "time": 0, "action": [
//!         { "type": "line", "duration": 5,
//!           "drones": [ { "id": 0, "startOffset": [0, 0, 0], "endOffset": [0, 0, 0] } ],
//!           "data": { "startPoint": [0, 0, 0], "endPoint": [10, 0, 0] } }
//!     ] }
//!   ],
//!   "breakpoints": [ { "name": "intro", "number": 1, "startTime": 0 } ],
//!   "theater_volume": { "min": [-20, -20, 0], "max": [20, 20, 15] }
//! }
//! ```
//!
//! Every slot's `time` is relative to the start of the current repeat pass. Only the last
//! slot of a pass moves the pass base forward, to that slot's end time.

use crate::{
    compile::bounds::TheaterVolume,
    compile::report::{CompileReport, Diagnostic},
    document::cursor::Cursor,
    document::node::DocumentNode,
    foundation::core::{Point, Seconds, Units, VehicleId},
    foundation::error::{ChorusError, ChorusResult},
    routine::action::{Action, ActionKind, EmptyAction, LightAction, MotionAction},
    routine::breakpoint::{Breakpoint, Breakpoints},
    trajectory::light::{IntensityRamp, LightTrajectory, StrobeTrajectory},
    trajectory::motion::{CircularTrajectory, LinearTrajectory},
};

const UNITS_KEY: &str = "units";
const LENGTH_KEY: &str = "length";
const ANGLE_KEY: &str = "angle";
const REPEAT_KEY: &str = "repeat";
const DRONES_KEY: &str = "drones";
const HOME_KEY: &str = "startPosition";
const CHOREOGRAPHY_KEY: &str = "chor";
const SLOT_TIME_KEY: &str = "time";
const SLOT_ACTIONS_KEY: &str = "action";
const TYPE_KEY: &str = "type";
const DURATION_KEY: &str = "duration";
const ID_KEY: &str = "id";
const START_OFFSET_KEY: &str = "startOffset";
const END_OFFSET_KEY: &str = "endOffset";
const DATA_KEY: &str = "data";
const START_POINT_KEY: &str = "startPoint";
const END_POINT_KEY: &str = "endPoint";
const HOVER_KEY: &str = "hoverPoint";
const ORIGIN_KEY: &str = "originPoint";
const RADIUS_KEY: &str = "radius";
const THETA1_KEY: &str = "theta1";
const THETA2_KEY: &str = "theta2";
const START_INTENSITY_KEY: &str = "startIntensity";
const END_INTENSITY_KEY: &str = "endIntensity";
const BPS_KEY: &str = "bps";
const BREAKPOINTS_KEY: &str = "breakpoints";
const BREAK_NAME_KEY: &str = "name";
const BREAK_NUMBER_KEY: &str = "number";
const BREAK_START_KEY: &str = "startTime";
const VOLUME_KEY: &str = "theater_volume";
const VOLUME_MIN_KEY: &str = "min";
const VOLUME_MAX_KEY: &str = "max";

/// Raw output of the load pass. Motion lists are in document order and may hold placeholders.
#[derive(Debug, Clone)]
pub(crate) struct LoadedDocument {
    pub(crate) units: Units,
    pub(crate) repeat: u32,
    pub(crate) homes: Vec<Point>,
    pub(crate) actions: Vec<Vec<Action>>,
    pub(crate) light_actions: Vec<Vec<LightAction>>,
    pub(crate) breakpoints: Breakpoints,
    pub(crate) volume: Option<TheaterVolume>,
}

struct SlotCtx {
    units: Units,
    vehicle_count: usize,
    base: Seconds,
    pass: u32,
    slot: usize,
}

struct Drone {
    vehicle: VehicleId,
    start_offset: Point,
    end_offset: Point,
}

#[tracing::instrument(skip(doc, report))]
pub(crate) fn load_document<D: DocumentNode>(
    doc: &D,
    scale: f64,
    report: &mut CompileReport,
) -> ChorusResult<LoadedDocument> {
    let root = Cursor::root(doc);

    let units_node = root.field(UNITS_KEY)?;
    let units = Units {
        length_in_feet: units_node.field(LENGTH_KEY)?.string()? == "feet",
        angle_in_degrees: units_node.field(ANGLE_KEY)?.string()? == "degrees",
        scale,
    };

    let repeat_node = root.field(REPEAT_KEY)?;
    let repeat = repeat_node.integer()?;
    if repeat < 1 {
        return Err(repeat_node.error(format!("repeat must be >= 1, got {repeat}")));
    }
    let repeat = u32::try_from(repeat)
        .map_err(|_| repeat_node.error(format!("repeat {repeat} is too large")))?;

    let length = units.length_factor();
    let homes = root
        .field(DRONES_KEY)?
        .array()?
        .iter()
        .map(|d| Ok(d.field(HOME_KEY)?.point()? * length))
        .collect::<ChorusResult<Vec<_>>>()?;

    let vehicle_count = homes.len();
    let mut actions: Vec<Vec<Action>> = vec![Vec::new(); vehicle_count];
    let mut light_actions: Vec<Vec<LightAction>> = vec![Vec::new(); vehicle_count];

    let slots = root.field(CHOREOGRAPHY_KEY)?.array()?;
    let mut base = 0.0;
    for pass in 0..repeat {
        for (slot_index, slot) in slots.iter().enumerate() {
            let ctx = SlotCtx {
                units,
                vehicle_count,
                base,
                pass,
                slot: slot_index,
            };
            let end = load_slot(slot, &ctx, &mut actions, &mut light_actions, report)?;
            if slot_index + 1 == slots.len() {
                base = end;
            }
        }
    }

    let breakpoints = load_breakpoints(&root)?;
    let volume = load_volume(&root, length)?;

    tracing::debug!(
        vehicles = vehicle_count,
        slots = slots.len(),
        repeat,
        breakpoints = breakpoints.len(),
        "document loaded"
    );

    Ok(LoadedDocument {
        units,
        repeat,
        homes,
        actions,
        light_actions,
        breakpoints,
        volume,
    })
}

/// Append every sub-action of one slot for one pass.
///
/// Returns the slot's end time: the end of its longest motion sub-action (lights and strobes
/// are not part of the motion timeline and do not count), or the slot start if it has none.
fn load_slot<D: DocumentNode>(
    slot: &Cursor<'_, D>,
    ctx: &SlotCtx,
    actions: &mut [Vec<Action>],
    light_actions: &mut [Vec<LightAction>],
    report: &mut CompileReport,
) -> ChorusResult<Seconds> {
    let start = ctx.base + slot.field(SLOT_TIME_KEY)?.non_negative()?;
    let mut end = start;

    for (action_index, sub) in slot.field(SLOT_ACTIONS_KEY)?.array()?.iter().enumerate() {
        let tag = sub.field(TYPE_KEY)?.string()?;
        let Some(kind) = ActionKind::from_tag(tag) else {
            if ctx.pass == 0 {
                report.push(Diagnostic::UnknownActionType {
                    slot: ctx.slot,
                    action: action_index,
                    type_tag: tag.to_string(),
                });
            }
            continue;
        };

        let duration_node = sub.field(DURATION_KEY)?;
        let duration = duration_node.non_negative()?;
        if kind == ActionKind::Transition && duration <= 0.0 {
            return Err(duration_node.error("transition duration must be > 0"));
        }
        let t0 = start;
        let t1 = start + duration;
        if !kind.is_light() {
            end = end.max(t1);
        }

        for drone in sub.field(DRONES_KEY)?.array()? {
            let drone = load_drone(&drone, ctx)?;
            let v = drone.vehicle.index();
            match kind {
                ActionKind::Light | ActionKind::Strobe => {
                    let trajectory = load_light(sub, kind, t0, t1)?;
                    light_actions[v].push(LightAction {
                        vehicle: drone.vehicle,
                        trajectory,
                    });
                }
                ActionKind::Transition => actions[v].push(Action::Empty(EmptyAction {
                    vehicle: drone.vehicle,
                    start_time: t0,
                    end_time: t1,
                })),
                ActionKind::Line | ActionKind::Circle | ActionKind::Hover => {
                    let motion = load_motion(sub, kind, &drone, ctx.units, t0, t1)?;
                    actions[v].push(Action::Motion(motion));
                }
            }
        }
    }

    Ok(end)
}

fn load_drone<D: DocumentNode>(drone: &Cursor<'_, D>, ctx: &SlotCtx) -> ChorusResult<Drone> {
    let id_node = drone.field(ID_KEY)?;
    let id = id_node.index()?;
    if id >= ctx.vehicle_count {
        return Err(id_node.error(format!(
            "vehicle id {id} out of range ({} vehicle(s) declared)",
            ctx.vehicle_count
        )));
    }
    let length = ctx.units.length_factor();
    Ok(Drone {
        vehicle: VehicleId(id),
        start_offset: drone.opt_point(START_OFFSET_KEY)?.unwrap_or_else(Point::zeros) * length,
        end_offset: drone.opt_point(END_OFFSET_KEY)?.unwrap_or_else(Point::zeros) * length,
    })
}

fn load_motion<D: DocumentNode>(
    sub: &Cursor<'_, D>,
    kind: ActionKind,
    drone: &Drone,
    units: Units,
    t0: Seconds,
    t1: Seconds,
) -> ChorusResult<MotionAction> {
    let data = sub.field(DATA_KEY)?;
    let length = units.length_factor();
    let at = |e: ChorusError| match e {
        ChorusError::Trajectory(msg) => data.error(msg),
        other => other,
    };

    let motion = match kind {
        ActionKind::Line => {
            let start = data.field(START_POINT_KEY)?.point()? * length;
            let end = data.field(END_POINT_KEY)?.point()? * length;
            MotionAction::new(
                drone.vehicle,
                kind,
                LinearTrajectory::new(start + drone.start_offset, t0, end + drone.end_offset, t1)
                    .map_err(at)?,
            )
        }
        ActionKind::Circle => {
            let origin = data.field(ORIGIN_KEY)?.point()? * length;
            let radius = data.field(RADIUS_KEY)?.non_negative()? * length;
            let angle = units.angle_factor();
            let theta1 = data.field(THETA1_KEY)?.number()? * angle;
            let theta2 = data.field(THETA2_KEY)?.number()? * angle;
            MotionAction::new(
                drone.vehicle,
                kind,
                CircularTrajectory::new(origin + drone.start_offset, radius, theta1, t0, theta2, t1)
                    .map_err(at)?,
            )
        }
        ActionKind::Hover => {
            let point = data.field(HOVER_KEY)?.point()? * length;
            MotionAction::new(
                drone.vehicle,
                kind,
                LinearTrajectory::new(point + drone.start_offset, t0, point + drone.end_offset, t1)
                    .map_err(at)?,
            )
        }
        ActionKind::Transition | ActionKind::Light | ActionKind::Strobe => {
            return Err(sub.error(format!("{} is not an authored motion", kind.tag())));
        }
    };
    Ok(motion)
}

fn load_light<D: DocumentNode>(
    sub: &Cursor<'_, D>,
    kind: ActionKind,
    t0: Seconds,
    t1: Seconds,
) -> ChorusResult<LightTrajectory> {
    let data = sub.field(DATA_KEY)?;
    let si = data.field(START_INTENSITY_KEY)?.number()?;
    let ei = data.field(END_INTENSITY_KEY)?.number()?;
    let ramp = IntensityRamp::new(si, t0, ei, t1).map_err(|e| data.error(e.to_string()))?;
    match kind {
        ActionKind::Strobe => {
            let bps = data.field(BPS_KEY)?.number()?;
            Ok(LightTrajectory::Strobe(StrobeTrajectory { ramp, bps }))
        }
        _ => Ok(LightTrajectory::Light(ramp)),
    }
}

fn load_breakpoints<D: DocumentNode>(root: &Cursor<'_, D>) -> ChorusResult<Breakpoints> {
    let Some(section) = root.opt_field(BREAKPOINTS_KEY) else {
        return Ok(Breakpoints::default());
    };
    let items = section
        .array()?
        .iter()
        .map(|b| {
            let number_node = b.field(BREAK_NUMBER_KEY)?;
            let number = u32::try_from(number_node.index()?)
                .map_err(|_| number_node.error("breakpoint number does not fit in u32"))?;
            Ok(Breakpoint {
                name: b.field(BREAK_NAME_KEY)?.string()?.to_string(),
                number,
                time_offset: b.field(BREAK_START_KEY)?.number()?,
            })
        })
        .collect::<ChorusResult<Vec<_>>>()?;
    Ok(Breakpoints::new(items))
}

fn load_volume<D: DocumentNode>(
    root: &Cursor<'_, D>,
    length: f64,
) -> ChorusResult<Option<TheaterVolume>> {
    let Some(section) = root.opt_field(VOLUME_KEY) else {
        return Ok(None);
    };
    let min = section.field(VOLUME_MIN_KEY)?.point()? * length;
    let max = section.field(VOLUME_MAX_KEY)?.point()? * length;
    TheaterVolume::new(min, max).map(Some)
}

#[cfg(test)]
#[path = "../../tests/unit/compile/loader.rs"]
mod tests;
