use std::f32::consts::PI;

use crate::collision::BodyHandle;
use crate::dynamics::RigidBody;
use crate::math::Vec3;

/// A handle to a joint in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointHandle(pub u32);

impl JointHandle {
    /// Creates a new joint handle
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the index of this handle
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Ball joint: pins a point on body A to a point on body B.
#[derive(Debug, Clone)]
pub struct PointToPointJoint {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    /// Pivot in body A's local frame
    pub pivot_a: Vec3,
    /// Pivot in body B's local frame
    pub pivot_b: Vec3,
    anchor_a: Vec3,
    anchor_b: Vec3,
}

impl PointToPointJoint {
    pub fn new(body_a: BodyHandle, body_b: BodyHandle, pivot_a: Vec3, pivot_b: Vec3) -> Self {
        Self {
            body_a,
            body_b,
            pivot_a,
            pivot_b,
            anchor_a: Vec3::ZERO,
            anchor_b: Vec3::ZERO,
        }
    }
}

/// Revolute joint: a point-to-point constraint plus axis alignment.
///
/// The single-body form anchors body A against a fixed world pivot and
/// axis, optionally driving it at a constant speed about that axis.
#[derive(Debug, Clone)]
pub struct HingeJoint {
    pub body_a: BodyHandle,
    /// None for the world-anchored form; `pivot_b` and `axis_b` are then
    /// fixed world-space values
    pub body_b: Option<BodyHandle>,
    pub pivot_a: Vec3,
    pub pivot_b: Vec3,
    /// Hinge axis in body A's local frame
    pub axis_a: Vec3,
    /// Hinge axis in body B's local frame (world frame if anchored)
    pub axis_b: Vec3,
    /// Constant angular speed imposed about the hinge axis
    pub drive_speed: Option<f32>,
    anchor_a: Vec3,
    anchor_b: Vec3,
    world_axis_a: Vec3,
    world_axis_b: Vec3,
}

impl HingeJoint {
    pub fn new(
        body_a: BodyHandle,
        body_b: BodyHandle,
        pivot_a: Vec3,
        pivot_b: Vec3,
        axis_a: Vec3,
        axis_b: Vec3,
    ) -> Self {
        Self {
            body_a,
            body_b: Some(body_b),
            pivot_a,
            pivot_b,
            axis_a,
            axis_b,
            drive_speed: None,
            anchor_a: Vec3::ZERO,
            anchor_b: Vec3::ZERO,
            world_axis_a: Vec3::ZERO,
            world_axis_b: Vec3::ZERO,
        }
    }

    /// Hinges a single body against a fixed world pivot and axis
    pub fn anchored(body: BodyHandle, pivot: Vec3, axis: Vec3) -> Self {
        Self {
            body_a: body,
            body_b: None,
            pivot_a: Vec3::ZERO,
            pivot_b: pivot,
            axis_a: axis,
            axis_b: axis,
            drive_speed: None,
            anchor_a: Vec3::ZERO,
            anchor_b: Vec3::ZERO,
            world_axis_a: Vec3::ZERO,
            world_axis_b: Vec3::ZERO,
        }
    }

    /// Drives the hinge at a constant angular speed
    pub fn with_drive_speed(mut self, speed: f32) -> Self {
        self.drive_speed = Some(speed);
        self
    }
}

/// Prismatic joint: hinge terms plus a translational correction along
/// the slide axis.
#[derive(Debug, Clone)]
pub struct SliderJoint {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub pivot_a: Vec3,
    pub pivot_b: Vec3,
    pub axis_a: Vec3,
    pub axis_b: Vec3,
    anchor_a: Vec3,
    anchor_b: Vec3,
    world_axis_a: Vec3,
    world_axis_b: Vec3,
}

impl SliderJoint {
    pub fn new(
        body_a: BodyHandle,
        body_b: BodyHandle,
        pivot_a: Vec3,
        pivot_b: Vec3,
        axis_a: Vec3,
        axis_b: Vec3,
    ) -> Self {
        Self {
            body_a,
            body_b,
            pivot_a,
            pivot_b,
            axis_a,
            axis_b,
            anchor_a: Vec3::ZERO,
            anchor_b: Vec3::ZERO,
            world_axis_a: Vec3::ZERO,
            world_axis_b: Vec3::ZERO,
        }
    }
}

/// Rod joint: keeps the anchor separation at a fixed length.
#[derive(Debug, Clone)]
pub struct DistanceJoint {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub pivot_a: Vec3,
    pub pivot_b: Vec3,
    /// Target anchor separation
    pub length: f32,
    anchor_a: Vec3,
    anchor_b: Vec3,
}

impl DistanceJoint {
    pub fn new(
        body_a: BodyHandle,
        body_b: BodyHandle,
        pivot_a: Vec3,
        pivot_b: Vec3,
        length: f32,
    ) -> Self {
        Self {
            body_a,
            body_b,
            pivot_a,
            pivot_b,
            length,
            anchor_a: Vec3::ZERO,
            anchor_b: Vec3::ZERO,
        }
    }
}

/// Spherical joint with angular limits: a point-to-point constraint plus
/// a swing cone and a twist bound about the shared axis.
#[derive(Debug, Clone)]
pub struct ConeTwistJoint {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub pivot_a: Vec3,
    pub pivot_b: Vec3,
    pub axis_a: Vec3,
    pub axis_b: Vec3,
    /// Swing limit in one direction (radians)
    pub swing_span1: f32,
    /// Swing limit in the perpendicular direction (radians)
    pub swing_span2: f32,
    /// Twist limit about the axis (radians)
    pub twist_span: f32,
    anchor_a: Vec3,
    anchor_b: Vec3,
    world_axis_a: Vec3,
    world_axis_b: Vec3,
}

impl ConeTwistJoint {
    pub fn new(
        body_a: BodyHandle,
        body_b: BodyHandle,
        pivot_a: Vec3,
        pivot_b: Vec3,
        axis_a: Vec3,
        axis_b: Vec3,
    ) -> Self {
        Self {
            body_a,
            body_b,
            pivot_a,
            pivot_b,
            axis_a,
            axis_b,
            swing_span1: PI,
            swing_span2: PI,
            twist_span: PI,
            anchor_a: Vec3::ZERO,
            anchor_b: Vec3::ZERO,
            world_axis_a: Vec3::ZERO,
            world_axis_b: Vec3::ZERO,
        }
    }

    /// Sets the two swing limits; the effective cone is their minimum
    pub fn with_swing_spans(mut self, span1: f32, span2: f32) -> Self {
        self.swing_span1 = span1;
        self.swing_span2 = span2;
        self
    }

    /// Sets the twist limit
    pub fn with_twist_span(mut self, span: f32) -> Self {
        self.twist_span = span;
        self
    }
}

/// A joint between bodies, solved once per step at the velocity level.
///
/// Each step runs `pre_solve` (refresh world anchors and axes from the
/// current transforms), then `solve` (velocity corrections that drive the
/// error toward zero at rate error/dt), then `post_solve`. A joint whose
/// handles no longer resolve to live bodies is skipped.
#[derive(Debug, Clone)]
pub enum Joint {
    PointToPoint(PointToPointJoint),
    Hinge(HingeJoint),
    Slider(SliderJoint),
    Distance(DistanceJoint),
    ConeTwist(ConeTwistJoint),
}

impl Joint {
    /// The body handles this joint references
    pub fn body_handles(&self) -> (BodyHandle, Option<BodyHandle>) {
        match self {
            Joint::PointToPoint(j) => (j.body_a, Some(j.body_b)),
            Joint::Hinge(j) => (j.body_a, j.body_b),
            Joint::Slider(j) => (j.body_a, Some(j.body_b)),
            Joint::Distance(j) => (j.body_a, Some(j.body_b)),
            Joint::ConeTwist(j) => (j.body_a, Some(j.body_b)),
        }
    }

    /// Refreshes cached world-space anchors and axes
    pub(crate) fn pre_solve(&mut self, bodies: &[RigidBody], _dt: f32) {
        match self {
            Joint::PointToPoint(j) => {
                let (Some(a), Some(b)) = (live(bodies, j.body_a), live(bodies, j.body_b)) else {
                    return;
                };
                j.anchor_a = world_anchor(a, j.pivot_a);
                j.anchor_b = world_anchor(b, j.pivot_b);
            }
            Joint::Hinge(j) => {
                let Some(a) = live(bodies, j.body_a) else {
                    return;
                };
                j.anchor_a = world_anchor(a, j.pivot_a);
                j.world_axis_a = a.rotation.rotate_vec(j.axis_a);
                match j.body_b {
                    Some(handle) => {
                        let Some(b) = live(bodies, handle) else {
                            return;
                        };
                        j.anchor_b = world_anchor(b, j.pivot_b);
                        j.world_axis_b = b.rotation.rotate_vec(j.axis_b);
                    }
                    None => {
                        // Anchored form: pivot and axis are world constants
                        j.anchor_b = j.pivot_b;
                        j.world_axis_b = j.axis_b;
                    }
                }
            }
            Joint::Slider(j) => {
                let (Some(a), Some(b)) = (live(bodies, j.body_a), live(bodies, j.body_b)) else {
                    return;
                };
                j.anchor_a = world_anchor(a, j.pivot_a);
                j.anchor_b = world_anchor(b, j.pivot_b);
                j.world_axis_a = a.rotation.rotate_vec(j.axis_a);
                j.world_axis_b = b.rotation.rotate_vec(j.axis_b);
            }
            Joint::Distance(j) => {
                let (Some(a), Some(b)) = (live(bodies, j.body_a), live(bodies, j.body_b)) else {
                    return;
                };
                j.anchor_a = world_anchor(a, j.pivot_a);
                j.anchor_b = world_anchor(b, j.pivot_b);
            }
            Joint::ConeTwist(j) => {
                let (Some(a), Some(b)) = (live(bodies, j.body_a), live(bodies, j.body_b)) else {
                    return;
                };
                j.anchor_a = world_anchor(a, j.pivot_a);
                j.anchor_b = world_anchor(b, j.pivot_b);
                j.world_axis_a = a.rotation.rotate_vec(j.axis_a);
                j.world_axis_b = b.rotation.rotate_vec(j.axis_b);
            }
        }
    }

    /// Applies one pass of velocity-level corrections
    pub(crate) fn solve(&mut self, bodies: &mut [RigidBody], dt: f32) {
        match self {
            Joint::PointToPoint(j) => {
                let Some((a, b)) = live_pair(bodies, j.body_a, j.body_b) else {
                    return;
                };
                let error = j.anchor_b - j.anchor_a;
                let (dir, len) = error.normalize_with_length();
                apply_linear(a, b, dir, len, dt);
            }
            Joint::Hinge(j) => match j.body_b {
                Some(handle) => {
                    let Some((a, b)) = live_pair(bodies, j.body_a, handle) else {
                        return;
                    };
                    let (dir, len) = (j.anchor_b - j.anchor_a).normalize_with_length();
                    apply_linear(a, b, dir, len, dt);

                    let (axis, err) = j.world_axis_a.cross(j.world_axis_b).normalize_with_length();
                    apply_angular(a, b, axis, err, dt);

                    if let Some(speed) = j.drive_speed {
                        drive_about_axis(a, j.world_axis_a, speed);
                    }
                }
                None => {
                    let Some(a) = live_mut(bodies, j.body_a) else {
                        return;
                    };
                    let (dir, len) = (j.anchor_b - j.anchor_a).normalize_with_length();
                    if a.inv_mass > 0.0 {
                        a.velocity += dir * (len / dt);
                    }

                    let (axis, err) = j.world_axis_a.cross(j.world_axis_b).normalize_with_length();
                    let inv_inertia = a.inv_inertia_tensor.diagonal().x;
                    if inv_inertia > 0.0 {
                        a.angular_velocity += axis * (err / dt);
                    }

                    if let Some(speed) = j.drive_speed {
                        drive_about_axis(a, j.world_axis_b, speed);
                    }
                }
            },
            Joint::Slider(j) => {
                let Some((a, b)) = live_pair(bodies, j.body_a, j.body_b) else {
                    return;
                };
                let offset = j.anchor_b - j.anchor_a;
                let (dir, len) = offset.normalize_with_length();
                apply_linear(a, b, dir, len, dt);

                let (axis, err) = j.world_axis_a.cross(j.world_axis_b).normalize_with_length();
                apply_angular(a, b, axis, err, dt);

                // Independent correction of the displacement along the axis
                let along = offset.dot(j.world_axis_a);
                apply_linear(a, b, j.world_axis_a, along, dt);
            }
            Joint::Distance(j) => {
                let Some((a, b)) = live_pair(bodies, j.body_a, j.body_b) else {
                    return;
                };
                let (dir, len) = (j.anchor_b - j.anchor_a).normalize_with_length();
                apply_linear(a, b, dir, len - j.length, dt);
            }
            Joint::ConeTwist(j) => {
                let Some((a, b)) = live_pair(bodies, j.body_a, j.body_b) else {
                    return;
                };
                let (dir, len) = (j.anchor_b - j.anchor_a).normalize_with_length();
                apply_linear(a, b, dir, len, dt);

                // Swing: only the angle beyond the cone is corrected
                let cos_swing = j.world_axis_a.dot(j.world_axis_b).clamp(-1.0, 1.0);
                let swing_angle = cos_swing.acos();
                let swing_limit = j.swing_span1.min(j.swing_span2);
                let swing_excess = swing_angle - swing_limit;
                if swing_excess > 0.0 {
                    let swing_axis = j.world_axis_a.cross(j.world_axis_b).normalize();
                    apply_angular(a, b, swing_axis, swing_excess, dt);
                }

                // Twist: swing-twist decomposition of the relative rotation,
                // projected onto the shared local axis
                let rel = a.rotation.conjugate() * b.rotation;
                let axis = j.axis_a.normalize();
                let along = rel.vec().dot(axis);
                let mut twist_angle = 2.0 * along.atan2(rel.w);
                if twist_angle > PI {
                    twist_angle -= 2.0 * PI;
                } else if twist_angle < -PI {
                    twist_angle += 2.0 * PI;
                }
                let twist_excess = twist_angle.abs() - j.twist_span;
                if twist_excess > 0.0 {
                    let twist_dir = j.world_axis_a * twist_angle.signum();
                    apply_angular(a, b, twist_dir, twist_excess, dt);
                }
            }
        }
    }

    /// Hook after solving; no joint currently carries per-step state to
    /// reset
    pub(crate) fn post_solve(&mut self) {}
}

#[inline]
fn world_anchor(body: &RigidBody, pivot: Vec3) -> Vec3 {
    body.position + body.rotation.rotate_vec(pivot)
}

/// Resolves a handle to a live body, rejecting freed or stale slots
fn live(bodies: &[RigidBody], handle: BodyHandle) -> Option<&RigidBody> {
    bodies
        .get(handle.index())
        .filter(|body| body.handle == handle)
}

fn live_mut(bodies: &mut [RigidBody], handle: BodyHandle) -> Option<&mut RigidBody> {
    bodies
        .get_mut(handle.index())
        .filter(|body| body.handle == handle)
}

/// Resolves two distinct handles to simultaneous mutable borrows
fn live_pair(
    bodies: &mut [RigidBody],
    handle_a: BodyHandle,
    handle_b: BodyHandle,
) -> Option<(&mut RigidBody, &mut RigidBody)> {
    let (ia, ib) = (handle_a.index(), handle_b.index());
    if ia == ib || ia >= bodies.len() || ib >= bodies.len() {
        return None;
    }
    if bodies[ia].handle != handle_a || bodies[ib].handle != handle_b {
        return None;
    }

    if ia < ib {
        let (left, right) = bodies.split_at_mut(ib);
        Some((&mut left[ia], &mut right[0]))
    } else {
        let (left, right) = bodies.split_at_mut(ia);
        Some((&mut right[0], &mut left[ib]))
    }
}

/// Velocity correction driving a signed positional error toward zero at
/// rate error/dt, weighted by inverse mass
fn apply_linear(a: &mut RigidBody, b: &mut RigidBody, dir: Vec3, error: f32, dt: f32) {
    let inv_mass_sum = a.inv_mass + b.inv_mass;
    if inv_mass_sum == 0.0 {
        return;
    }
    let lambda = error / (dt * inv_mass_sum);
    a.velocity += dir * (lambda * a.inv_mass);
    b.velocity -= dir * (lambda * b.inv_mass);
}

/// Angular counterpart of `apply_linear`, using the scalar inverse
/// inertia from the tensor diagonal
fn apply_angular(a: &mut RigidBody, b: &mut RigidBody, axis: Vec3, error: f32, dt: f32) {
    let inv_inertia_a = a.inv_inertia_tensor.diagonal().x;
    let inv_inertia_b = b.inv_inertia_tensor.diagonal().x;
    let inv_sum = inv_inertia_a + inv_inertia_b;
    if inv_sum == 0.0 {
        return;
    }
    let lambda = error / (dt * inv_sum);
    a.angular_velocity += axis * (lambda * inv_inertia_a);
    b.angular_velocity -= axis * (lambda * inv_inertia_b);
}

/// Replaces the angular velocity component along the axis with a constant
/// drive speed
fn drive_about_axis(body: &mut RigidBody, axis: Vec3, speed: f32) {
    if body.inv_mass == 0.0 {
        return;
    }
    let spin = body.angular_velocity.dot(axis);
    body.angular_velocity += axis * (speed - spin);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Quat;
    use approx::assert_relative_eq;

    const DT: f32 = 0.1;

    fn dynamic_at(index: u32, pos: Vec3) -> RigidBody {
        let mut body = RigidBody::new().with_mass(1.0).with_position(pos);
        body.handle = BodyHandle::new(index);
        body
    }

    fn static_at(index: u32, pos: Vec3) -> RigidBody {
        let mut body = RigidBody::new().with_position(pos);
        body.handle = BodyHandle::new(index);
        body
    }

    fn run(joint: &mut Joint, bodies: &mut [RigidBody]) {
        joint.pre_solve(bodies, DT);
        joint.solve(bodies, DT);
        joint.post_solve();
    }

    #[test]
    fn test_point_to_point_pulls_anchors_together() {
        let mut bodies = [
            dynamic_at(0, Vec3::ZERO),
            dynamic_at(1, Vec3::new(2.0, 0.0, 0.0)),
        ];
        let mut joint = Joint::PointToPoint(PointToPointJoint::new(
            BodyHandle::new(0),
            BodyHandle::new(1),
            Vec3::ZERO,
            Vec3::ZERO,
        ));

        run(&mut joint, &mut bodies);

        // Error 2 along +X shared by equal masses: each body takes half
        assert_relative_eq!(bodies[0].velocity.x, 1.0 / DT, epsilon = 1e-4);
        assert_relative_eq!(bodies[1].velocity.x, -1.0 / DT, epsilon = 1e-4);

        // Relative closing rate removes the whole error over one step
        let closing = (bodies[1].velocity - bodies[0].velocity).x;
        assert_relative_eq!(closing, -2.0 / DT, epsilon = 1e-3);
    }

    #[test]
    fn test_point_to_point_static_partner_never_moves() {
        let mut bodies = [
            dynamic_at(0, Vec3::ZERO),
            static_at(1, Vec3::new(2.0, 0.0, 0.0)),
        ];
        let mut joint = Joint::PointToPoint(PointToPointJoint::new(
            BodyHandle::new(0),
            BodyHandle::new(1),
            Vec3::ZERO,
            Vec3::ZERO,
        ));

        run(&mut joint, &mut bodies);

        assert_relative_eq!(bodies[0].velocity.x, 2.0 / DT, epsilon = 1e-3);
        assert_eq!(bodies[1].velocity, Vec3::ZERO);
    }

    #[test]
    fn test_point_to_point_uses_rotated_pivots() {
        // Body B rotated 90 degrees about Z carries its pivot from local
        // +X to world +Y
        let mut bodies = [
            dynamic_at(0, Vec3::ZERO),
            dynamic_at(1, Vec3::ZERO),
        ];
        bodies[1].rotation = Quat::from_axis_angle(Vec3::Z, std::f32::consts::FRAC_PI_2);

        let mut joint = Joint::PointToPoint(PointToPointJoint::new(
            BodyHandle::new(0),
            BodyHandle::new(1),
            Vec3::ZERO,
            Vec3::X,
        ));

        run(&mut joint, &mut bodies);

        // Anchor B sits at world (0, 1, 0): body A accelerates toward +Y
        assert!(bodies[0].velocity.y > 0.0);
        assert_relative_eq!(bodies[0].velocity.x, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_hinge_aligns_axes() {
        let mut bodies = [
            dynamic_at(0, Vec3::ZERO),
            dynamic_at(1, Vec3::ZERO),
        ];
        let mut joint = Joint::Hinge(HingeJoint::new(
            BodyHandle::new(0),
            BodyHandle::new(1),
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
        ));

        run(&mut joint, &mut bodies);

        // X x Y = Z: body A spins toward +Z, body B toward -Z
        assert!(bodies[0].angular_velocity.z > 0.0);
        assert!(bodies[1].angular_velocity.z < 0.0);
    }

    #[test]
    fn test_anchored_hinge_pulls_body_to_pivot() {
        let mut bodies = [dynamic_at(0, Vec3::ZERO)];
        let mut joint = Joint::Hinge(HingeJoint::anchored(
            BodyHandle::new(0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::Z,
        ));

        run(&mut joint, &mut bodies);

        assert_relative_eq!(bodies[0].velocity.y, 1.0 / DT, epsilon = 1e-3);
    }

    #[test]
    fn test_anchored_hinge_drive() {
        let mut bodies = [dynamic_at(0, Vec3::ZERO)];
        let mut joint = Joint::Hinge(
            HingeJoint::anchored(BodyHandle::new(0), Vec3::ZERO, Vec3::Z).with_drive_speed(2.0),
        );

        run(&mut joint, &mut bodies);

        assert_relative_eq!(bodies[0].angular_velocity.z, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_slider_corrects_along_axis() {
        let mut bodies = [
            dynamic_at(0, Vec3::ZERO),
            dynamic_at(1, Vec3::new(2.0, 0.0, 0.0)),
        ];
        let mut joint = Joint::Slider(SliderJoint::new(
            BodyHandle::new(0),
            BodyHandle::new(1),
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::X,
            Vec3::X,
        ));

        run(&mut joint, &mut bodies);

        // Point term and axis term both act on the same displacement
        assert_relative_eq!(bodies[0].velocity.x, 2.0 / DT, epsilon = 1e-3);
        assert_relative_eq!(bodies[1].velocity.x, -2.0 / DT, epsilon = 1e-3);
    }

    #[test]
    fn test_distance_joint_approaches_target() {
        // Too far apart: bodies approach
        let mut bodies = [
            dynamic_at(0, Vec3::ZERO),
            dynamic_at(1, Vec3::new(3.0, 0.0, 0.0)),
        ];
        let mut joint = Joint::Distance(DistanceJoint::new(
            BodyHandle::new(0),
            BodyHandle::new(1),
            Vec3::ZERO,
            Vec3::ZERO,
            2.0,
        ));
        run(&mut joint, &mut bodies);
        assert!(bodies[0].velocity.x > 0.0);
        assert!(bodies[1].velocity.x < 0.0);

        // Too close: bodies separate
        let mut bodies = [
            dynamic_at(0, Vec3::ZERO),
            dynamic_at(1, Vec3::new(1.0, 0.0, 0.0)),
        ];
        let mut joint = Joint::Distance(DistanceJoint::new(
            BodyHandle::new(0),
            BodyHandle::new(1),
            Vec3::ZERO,
            Vec3::ZERO,
            2.0,
        ));
        run(&mut joint, &mut bodies);
        assert!(bodies[0].velocity.x < 0.0);
        assert!(bodies[1].velocity.x > 0.0);
    }

    #[test]
    fn test_cone_twist_inside_limits_is_inert() {
        let mut bodies = [
            dynamic_at(0, Vec3::ZERO),
            dynamic_at(1, Vec3::ZERO),
        ];
        let mut joint = Joint::ConeTwist(
            ConeTwistJoint::new(
                BodyHandle::new(0),
                BodyHandle::new(1),
                Vec3::ZERO,
                Vec3::ZERO,
                Vec3::X,
                Vec3::X,
            )
            .with_swing_spans(0.5, 0.5)
            .with_twist_span(0.5),
        );

        run(&mut joint, &mut bodies);

        assert_eq!(bodies[0].angular_velocity, Vec3::ZERO);
        assert_eq!(bodies[1].angular_velocity, Vec3::ZERO);
        assert_eq!(bodies[0].velocity, Vec3::ZERO);
    }

    #[test]
    fn test_cone_twist_swing_limit() {
        let mut bodies = [
            dynamic_at(0, Vec3::ZERO),
            dynamic_at(1, Vec3::ZERO),
        ];
        // Body B swung 90 degrees about Z against a 45 degree cone
        bodies[1].rotation = Quat::from_axis_angle(Vec3::Z, std::f32::consts::FRAC_PI_2);

        let mut joint = Joint::ConeTwist(
            ConeTwistJoint::new(
                BodyHandle::new(0),
                BodyHandle::new(1),
                Vec3::ZERO,
                Vec3::ZERO,
                Vec3::X,
                Vec3::X,
            )
            .with_swing_spans(std::f32::consts::FRAC_PI_4, std::f32::consts::FRAC_PI_4),
        );

        run(&mut joint, &mut bodies);

        // Swing axis X x Y = Z: A rotates toward B, B back toward A
        assert!(bodies[0].angular_velocity.z > 0.0);
        assert!(bodies[1].angular_velocity.z < 0.0);
    }

    #[test]
    fn test_cone_twist_twist_limit() {
        let mut bodies = [
            dynamic_at(0, Vec3::ZERO),
            dynamic_at(1, Vec3::ZERO),
        ];
        // Body B twisted 90 degrees about the shared X axis, 45 allowed
        bodies[1].rotation = Quat::from_axis_angle(Vec3::X, std::f32::consts::FRAC_PI_2);

        let mut joint = Joint::ConeTwist(
            ConeTwistJoint::new(
                BodyHandle::new(0),
                BodyHandle::new(1),
                Vec3::ZERO,
                Vec3::ZERO,
                Vec3::X,
                Vec3::X,
            )
            .with_twist_span(std::f32::consts::FRAC_PI_4),
        );

        run(&mut joint, &mut bodies);

        // Positive twist: A speeds up about +X, B about -X
        assert!(bodies[0].angular_velocity.x > 0.0);
        assert!(bodies[1].angular_velocity.x < 0.0);
    }

    #[test]
    fn test_stale_handle_is_skipped() {
        let mut bodies = [dynamic_at(0, Vec3::ZERO)];
        let mut joint = Joint::PointToPoint(PointToPointJoint::new(
            BodyHandle::new(0),
            BodyHandle::new(7), // out of range
            Vec3::ZERO,
            Vec3::ZERO,
        ));

        run(&mut joint, &mut bodies);
        assert_eq!(bodies[0].velocity, Vec3::ZERO);
    }
}
