mod joint;

pub use joint::{
    ConeTwistJoint, DistanceJoint, HingeJoint, Joint, JointHandle, PointToPointJoint, SliderJoint,
};
