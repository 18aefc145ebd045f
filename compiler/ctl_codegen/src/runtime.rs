//! Runtime preamble.
//!
//! Fixed C++ support code written once at the head of the body stream:
//! includes, the `_ctlcc_` namespace with the standard library helpers
//! (printing, classification, libm wrappers, vector/matrix helpers, color
//! space conversions and 1-D table lookup). Only the precision-dependent
//! spellings vary.

use crate::config::CodegenConfig;

const TEMPLATE: &str = r#"// C++ code automatically generated

#include <ImathVec.h>
#include <ImathMatrix.h>
#include <ImathFun.h>
#include <half.h>
#include <float.h>
#include <math.h>
#include <limits.h>
#include <iostream>
#include <stdexcept>
#include <limits>
#include <vector>
#include <CtlLookupTable.h>

using namespace Ctl;

namespace _ctlcc_ {

struct Chromaticities { @V2F@ red; @V2F@ green; @V2F@ blue; @V2F@ white; };
struct Box2i { @V2I@ min; @V2I@ max; };
struct Box2f { @V2F@ min; @V2F@ max; };

static inline void assert( bool v ) { if (!v) throw std::logic_error( "Assertion failure" ); }

static inline void print_bool( bool v ) { std::cout << (v ? "true" : "false"); }
static inline void print_int( int v ) { std::cout << v; }
static inline void print_unsigned_int( unsigned int v ) { std::cout << v; }
static inline void print_half( half v ) { std::cout << v; }
static inline void print_float( @T@ v ) { std::cout << v; }
static inline void print_string( const std::string &v ) { std::cout << v; }
static inline void print_string( const char *v ) { std::cout << v; }

static inline bool isfinite_f( @T@ v ) { return isfinite( v ); }
static inline bool isnormal_f( @T@ v ) { return isnormal( v ); }
static inline bool isnan_f( @T@ v ) { return isnan( v ); }
static inline bool isinf_f( @T@ v ) { return isinf( v ) != 0; }
static inline bool isfinite_h( half v ) { return v.isFinite(); }
static inline bool isnormal_h( half v ) { return v.isNormalized(); }
static inline bool isnan_h( half v ) { return v.isNan(); }
static inline bool isinf_h( half v ) { return v.isInfinity() != 0; }

#define FLT_POS_INF std::numeric_limits<@T@>::infinity()
#define FLT_NEG_INF (-std::numeric_limits<@T@>::infinity())
#define FLT_NAN (-std::numeric_limits<@T@>::quiet_NaN())
#define HALF_POS_INF half::posInf()
#define HALF_NEG_INF half::negInf()
#define HALF_NAN half::qNan()

static inline @T@ acos( @T@ v ) { return ::acos@S@( v ); }
static inline @T@ asin( @T@ v ) { return ::asin@S@( v ); }
static inline @T@ atan( @T@ v ) { return ::atan@S@( v ); }
static inline @T@ atan2( @T@ y, @T@ x ) { return ::atan2@S@( y, x ); }
static inline @T@ cos( @T@ v ) { return ::cos@S@( v ); }
static inline @T@ sin( @T@ v ) { return ::sin@S@( v ); }
static inline @T@ tan( @T@ v ) { return ::tan@S@( v ); }
static inline @T@ cosh( @T@ v ) { return ::cosh@S@( v ); }
static inline @T@ sinh( @T@ v ) { return ::sinh@S@( v ); }
static inline @T@ tanh( @T@ v ) { return ::tanh@S@( v ); }
static inline @T@ exp( @T@ v ) { return ::exp@S@( v ); }
static inline @T@ log( @T@ v ) { return ::log@S@( v ); }
static inline @T@ log10( @T@ v ) { return ::log10@S@( v ); }
static inline @T@ pow( @T@ x, @T@ y ) { return ::pow@S@( x, y ); }
static inline @T@ pow10( @T@ y ) { return ::pow@S@( 10.0, y ); }
static inline @T@ sqrt( @T@ v ) { return ::sqrt@S@( v ); }
static inline @T@ fabs( @T@ v ) { return ::fabs@S@( v ); }
static inline @T@ floor( @T@ v ) { return ::floor@S@( v ); }
static inline @T@ fmod( @T@ x, @T@ y ) { return ::fmod@S@( x, y ); }
static inline @T@ hypot( @T@ x, @T@ y ) { return ::hypot@S@( x, y ); }

static inline half exp_h( @T@ v ) { return half( exp( v ) ); }
static inline @T@ log_h( half v ) { return log( float( v ) ); }
static inline @T@ log10_h( half v ) { return log10( float( v ) ); }
static inline half pow_h( half x, @T@ y ) { return half( pow( float( x ), y ) ); }
static inline half pow10_h( @T@ v ) { return half( pow( 10.0, v ) ); }

static inline @M33@ mult_f33_f33( const @M33@ &a, const @M33@ &b ) { return a * b; }
static inline @M44@ mult_f44_f44( const @M44@ &a, const @M44@ &b ) { return a * b; }
static inline @M33@ mult_f_f33( @T@ a, const @M33@ &b ) { return a * b; }
static inline @M44@ mult_f_f44( @T@ a, const @M44@ &b ) { return a * b; }
static inline @M33@ add_f33_f33( const @M33@ &a, const @M33@ &b ) { return a + b; }
static inline @M44@ add_f44_f44( const @M44@ &a, const @M44@ &b ) { return a + b; }
static inline @M33@ invert_f33( const @M33@ &a ) { return a.inverse(); }
static inline @M44@ invert_f44( const @M44@ &a ) { return a.inverse(); }
static inline @M33@ transpose_f33( const @M33@ &a ) { return a.transposed(); }
static inline @M44@ transpose_f44( const @M44@ &a ) { return a.transposed(); }
static inline @V3@ mult_f3_f33( const @V3@ &a, const @M33@ &b ) { return a * b; }
static inline @V3@ mult_f3_f44( const @V3@ &a, const @M44@ &b ) { return a * b; }
static inline @V3@ mult_f_f3( @T@ a, const @V3@ &b ) { return a * b; }
static inline @V3@ add_f3_f3( const @V3@ &a, const @V3@ &b ) { return a + b; }
static inline @V3@ sub_f3_f3( const @V3@ &a, const @V3@ &b ) { return a - b; }
static inline @V3@ cross_f3_f3( const @V3@ &a, const @V3@ &b ) { return a.cross( b ); }
static inline @T@ dot_f3_f3( const @V3@ &a, const @V3@ &b ) { return a.dot( b ); }
static inline @T@ length_f3( const @V3@ &a ) { return a.length(); }

namespace {
static inline @T@ __cspace_f( @T@ x ) { if ( x > @T@(0.008856) ) return pow( x, @T@(1.0 / 3.0) ); return @T@(7.787) * x + @T@(16.0 / 116.0); }
static inline @T@ __cspace_fInverse( @T@ t ) { if ( t > @T@(0.206892) ) return t * t * t; return @T@(1.0/7.787) * ( t - @T@(16.0/116.0) ); }
static inline @T@ __cspace_uprime( const @V3@ &XYZ ) { return ( XYZ.x * @T@(4) ) / ( XYZ.x + @T@(15) * XYZ.y + @T@(3) * XYZ.z ); }
static inline @T@ __cspace_vprime( const @V3@ &XYZ ) { return ( XYZ.y * @T@(9) ) / ( XYZ.x + @T@(15) * XYZ.y + @T@(3) * XYZ.z ); }
} // empty namespace

static inline @M44@ RGBtoXYZ( const Chromaticities &chroma, @T@ Y )
{
    static const @T@ one = @T@(1);
    @T@ X = chroma.white.x * Y / chroma.white.y;
    @T@ Z = (one - chroma.white.x - chroma.white.y) * Y / chroma.white.y;
    @T@ d = chroma.red.x * (chroma.blue.y - chroma.green.y) + chroma.blue.x * (chroma.green.y - chroma.red.y) + chroma.green.x * (chroma.red.y - chroma.blue.y);
    @T@ Sr = (X * (chroma.blue.y - chroma.green.y) - chroma.green.x * (Y * (chroma.blue.y - one) + chroma.blue.y * (X + Z)) + chroma.blue.x * (Y * (chroma.green.y - one) + chroma.green.y * (X + Z))) / d;
    @T@ Sg = (X * (chroma.red.y - chroma.blue.y) + chroma.red.x * (Y * (chroma.blue.y - one) + chroma.blue.y * (X + Z)) - chroma.blue.x * (Y * (chroma.red.y - one) + chroma.red.y * (X + Z))) / d;
    @T@ Sb = (X * (chroma.green.y - chroma.red.y) - chroma.red.x * (Y * (chroma.green.y - one) + chroma.green.y * (X + Z)) + chroma.green.x * (Y * (chroma.red.y - one) + chroma.red.y * (X + Z))) / d;
    @M44@ M;
    M[0][0] = Sr * chroma.red.x;
    M[0][1] = Sr * chroma.red.y;
    M[0][2] = Sr * (1 - chroma.red.x - chroma.red.y);
    M[1][0] = Sg * chroma.green.x;
    M[1][1] = Sg * chroma.green.y;
    M[1][2] = Sg * (1 - chroma.green.x - chroma.green.y);
    M[2][0] = Sb * chroma.blue.x;
    M[2][1] = Sb * chroma.blue.y;
    M[2][2] = Sb * (1 - chroma.blue.x - chroma.blue.y);
    return M;
}
static inline @M44@ XYZtoRGB( const Chromaticities &chroma, @T@ Y ) { return RGBtoXYZ( chroma, Y ).inverse(); }
static inline @V3@ XYZtoLuv( const @V3@ &XYZ, const @V3@ &XYZn )
{
    @T@ Lstar = @T@(116) * __cspace_f( XYZ.y / XYZn.y ) - @T@(16);
    @T@ ustar = @T@(13) * Lstar * ( __cspace_uprime( XYZ ) - __cspace_uprime( XYZn ) );
    @T@ vstar = @T@(13) * Lstar * ( __cspace_vprime( XYZ ) - __cspace_vprime( XYZn ) );
    return @V3@( Lstar, ustar, vstar );
}
static inline @V3@ LuvtoXYZ( const @V3@ &Luv, const @V3@ &XYZn )
{
    @T@ Lstar = Luv.x;
    @T@ ustar = Luv.y;
    @T@ vstar = Luv.z;
    @T@ unprime = __cspace_uprime( XYZn );
    @T@ vnprime = __cspace_vprime( XYZn );
    @T@ fY = (Lstar + @T@(16)) / @T@(116);
    @T@ Y = XYZn.y * __cspace_fInverse( fY );
    @T@ d = @T@(4) * (@T@(13) * Lstar * vnprime + vstar);
    @T@ X = @T@(9) * (@T@(13) * Lstar * unprime + ustar) * Y / d;
    @T@ Z = -( @T@(3) * ustar + @T@(13) * Lstar * ( @T@(-12) + @T@(3) * unprime + @T@(20) * vnprime ) + @T@(20) * vstar ) * Y / d;
    return @V3@( X, Y, Z );
}
static inline @V3@ XYZtoLab( const @V3@ &XYZ, const @V3@ &XYZn )
{
    @T@ tmpY = __cspace_f( XYZ.y / XYZn.y );
    @T@ Lstar = @T@(116) * tmpY - @T@(16);
    @T@ astar = @T@(500) * ( __cspace_f( XYZ.x / XYZn.x ) -  tmpY );
    @T@ bstar = @T@(200) * ( tmpY - __cspace_f( XYZ.z / XYZn.z ) );
    return @V3@( Lstar, astar, bstar );
}
static inline @V3@ LabtoXYZ( const @V3@ &Lab, const @V3@ &XYZn )
{
    @T@ Lstar = Lab.x;
    @T@ astar = Lab.y;
    @T@ bstar = Lab.z;
    @T@ fY = (Lstar + @T@(16)) / @T@(116);
    @T@ fX = astar / @T@(500) + fY;
    @T@ fZ = fY - bstar / @T@(200);
    @T@ X = XYZn.x * __cspace_fInverse( fX );
    @T@ Y = XYZn.y * __cspace_fInverse( fY );
    @T@ Z = XYZn.z * __cspace_fInverse( fZ );
    return @V3@( X, Y, Z );
}

static inline @T@ lookup1D( @T@ table[], int size, @T@ pMin, @T@ pMax, @T@ p )
{
    int iMax = size - 1;
    @T@ r = ( clamp( p, pMin, pMax ) - pMin ) / ( pMax - pMin ) * iMax;
    int i = static_cast<int>( r );
    @T@ u = r - static_cast<@T@>( i );
    @T@ t0 = table[i];
    @T@ t1 = table[std::min( i + 1, iMax )];
    return t0 + u * ( t1 - t0 );
}
} // namespace _ctlcc_

"#;

/// Render the preamble for a configuration.
pub fn preamble(config: &CodegenConfig) -> String {
    let ns = &config.imath_namespace;
    let suffix = config.precision.native_suffix();
    TEMPLATE
        .replace("@T@", config.precision.scalar_type())
        .replace("@S@", config.precision.libm_suffix())
        .replace("@V3@", &format!("{ns}::V3{suffix}"))
        .replace("@M33@", &format!("{ns}::M33{suffix}"))
        .replace("@M44@", &format!("{ns}::M44{suffix}"))
        .replace("@V2F@", &format!("{ns}::V2f"))
        .replace("@V2I@", &format!("{ns}::V2i"))
}
